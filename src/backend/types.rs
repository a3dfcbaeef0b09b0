//! Wire types for backend communication
//!
//! The research response is deliberately loose: the backend may populate any
//! subset of `ai_summary`, `response`, `search_results`, and `results` in the
//! same payload, and every populated field gets rendered. Unknown fields
//! (ids, timestamps) are ignored on deserialization.

use serde::{Deserialize, Serialize};

/// Backend processing path for a research query. The wire name doubles as the
/// endpoint path segment (`/api/query`, `/api/search`, `/api/combined`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// AI response only
    Query,
    /// Web search only
    Search,
    /// Search results plus an AI summary, merged server-side
    #[default]
    Combined,
}

impl DispatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchMode::Query => "query",
            DispatchMode::Search => "search",
            DispatchMode::Combined => "combined",
        }
    }
}

/// Body for the research endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ResearchRequest {
    pub query: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One web search hit. Server ordering is preserved; no uniqueness is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Response from any of the three research endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResearchResponse {
    #[serde(default)]
    pub ai_summary: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub search_results: Vec<SearchHit>,
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

impl ResearchResponse {
    /// The AI summary, when actually populated. An empty string counts as
    /// absent and renders no card.
    pub fn summary(&self) -> Option<&str> {
        self.ai_summary.as_deref().filter(|s| !s.is_empty())
    }

    /// The direct AI response, with the same non-empty rule.
    pub fn answer(&self) -> Option<&str> {
        self.response.as_deref().filter(|s| !s.is_empty())
    }
}

/// One past query as stored by the backend. The client never constructs
/// these locally; it only re-reads the list after a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One aggregated news article, replaced wholesale on every fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsFeed {
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
}
