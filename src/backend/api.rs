//! HTTP client for the Python backend API

use reqwest::Client;

use crate::backend::types::{
    DispatchMode, HistoryEntry, NewsArticle, NewsFeed, ResearchRequest, ResearchResponse,
};

/// Client for communicating with the FinanceSpace FastAPI backend.
///
/// Cheap to clone; each in-flight task grabs its own copy.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send a research query to the endpoint selected by `mode`.
    pub async fn research(
        &self,
        mode: DispatchMode,
        query: &str,
    ) -> Result<ResearchResponse, String> {
        let url = format!("{}/api/{}", self.base_url, mode.as_str());
        let request = ResearchRequest {
            query: query.to_string(),
            kind: mode.as_str().to_string(),
        };
        self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| e.to_string())?
            .json()
            .await
            .map_err(|e| e.to_string())
    }

    /// Fetch the conversation history, newest-first per the backend contract.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, String> {
        let url = format!("{}/api/history", self.base_url);
        self.client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| e.to_string())?
            .json()
            .await
            .map_err(|e| e.to_string())
    }

    /// Fetch news articles for a category. `region` of `None` means no
    /// regional constraint; the parameter is omitted from the request.
    pub async fn news(
        &self,
        category: &str,
        region: Option<&str>,
    ) -> Result<Vec<NewsArticle>, String> {
        let url = format!("{}/api/news", self.base_url);
        let mut params = vec![("category", category)];
        if let Some(region) = region {
            params.push(("region", region));
        }
        let feed: NewsFeed = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| e.to_string())?
            .json()
            .await
            .map_err(|e| e.to_string())?;
        Ok(feed.articles)
    }
}
