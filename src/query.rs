//! Query dispatch state machine
//!
//! Owns the query text and the single result slot. Each dispatch gets a
//! monotonically increasing sequence number; a completion whose number is not
//! the latest issued is discarded, so a slow earlier response can never
//! overwrite a newer one.

use crate::backend::types::{DispatchMode, ResearchResponse};

/// Generic user-facing message for any transport or backend failure.
pub const DISPATCH_ERROR: &str = "Failed to process query. Please try again.";

/// The one result slot rendered at a time.
#[derive(Debug, Clone)]
pub enum QueryResult {
    /// Dispatch failed; carries the query text as it was when sent.
    Failure { message: String, query: String },
    /// Successful response, kept verbatim. Any subset of its fields may be
    /// populated and each populated field renders as its own card.
    Research(ResearchResponse),
}

#[derive(Debug, Default)]
pub struct QueryDispatcher {
    query_text: String,
    mode: DispatchMode,
    loading: bool,
    result: Option<QueryResult>,
    /// Latest issued request sequence number.
    seq: u64,
    /// Query text captured when the in-flight request was issued.
    sent_query: String,
}

impl QueryDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Always allowed, even while a request is in flight.
    pub fn set_query_text(&mut self, text: String) {
        self.query_text = text;
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&QueryResult> {
        self.result.as_ref()
    }

    /// True when a dispatch would actually be issued right now.
    pub fn can_dispatch(&self) -> bool {
        !self.loading && !self.query_text.trim().is_empty()
    }

    /// Start a dispatch. Returns the sequence number to tag the request with,
    /// or `None` when the query is blank or one is already loading.
    pub fn begin(&mut self, mode: DispatchMode) -> Option<u64> {
        if !self.can_dispatch() {
            return None;
        }
        self.mode = mode;
        self.loading = true;
        self.sent_query = self.query_text.clone();
        self.seq += 1;
        Some(self.seq)
    }

    /// Complete a dispatch. Stale completions are dropped without touching
    /// state. Returns true only when a success was applied, which is the
    /// caller's cue to chain a history refresh.
    pub fn finish(&mut self, seq: u64, outcome: Result<ResearchResponse, String>) -> bool {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "discarding stale research response");
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(body) => {
                self.result = Some(QueryResult::Research(body));
                true
            }
            Err(err) => {
                tracing::warn!("research request failed: {}", err);
                self.result = Some(QueryResult::Failure {
                    message: DISPATCH_ERROR.to_string(),
                    query: self.sent_query.clone(),
                });
                false
            }
        }
    }

    /// Drop the displayed result. Used on theme switch; the unsent query
    /// text is kept verbatim.
    pub fn clear_result(&mut self) {
        self.result = None;
    }
}
