//! Recent query history
//!
//! The backend owns history; the client only re-reads the full list after
//! every successful dispatch and shows the most recent entries in server
//! order (newest-first per the backend contract, which is assumed, not
//! verified client-side).

use crate::backend::types::HistoryEntry;

/// How many entries the sidebar shows.
const VISIBLE_ENTRIES: usize = 5;

#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    /// Latest issued refresh sequence number.
    seq: u64,
    in_flight: bool,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh; the returned sequence number tags the request.
    pub fn begin_refresh(&mut self) -> u64 {
        self.seq += 1;
        self.in_flight = true;
        self.seq
    }

    /// Complete a refresh. A failure is swallowed: the previously held list
    /// is retained unchanged, never cleared. Stale completions are dropped.
    pub fn apply(&mut self, seq: u64, outcome: Result<Vec<HistoryEntry>, String>) {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "discarding stale history refresh");
            return;
        }
        self.in_flight = false;
        match outcome {
            Ok(entries) => self.entries = entries,
            Err(err) => tracing::warn!("history refresh failed: {}", err),
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// The five most recent entries, in server-returned order.
    pub fn recent(&self) -> &[HistoryEntry] {
        let len = self.entries.len().min(VISIBLE_ENTRIES);
        &self.entries[..len]
    }
}
