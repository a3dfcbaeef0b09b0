//! News feed state, scoped to the active theme
//!
//! Owns the `{category, region}` selection and the article list. Category is
//! theme-scoped: switching themes resets it to the new theme's default while
//! the region survives. Every change to theme, category, or region starts a
//! fresh fetch; completions are tagged with a sequence number so a stale
//! response cannot overwrite a newer one. This controller never serializes
//! against query dispatches.

use std::fmt;

use crate::backend::types::NewsArticle;
use crate::theme::Theme;

/// Generic user-facing message for a failed news fetch.
pub const NEWS_ERROR: &str = "Failed to load news. Please try again later.";

/// Regional constraint for the news feed. `Global` means no constraint and
/// sends no region parameter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Global,
    UnitedStates,
    Europe,
    Asia,
    India,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Global,
        Region::UnitedStates,
        Region::Europe,
        Region::Asia,
        Region::India,
    ];

    /// The wire value, or `None` when no constraint applies.
    pub fn country_param(self) -> Option<&'static str> {
        match self {
            Region::Global => None,
            Region::UnitedStates => Some("us"),
            Region::Europe => Some("eu"),
            Region::Asia => Some("asia"),
            Region::India => Some("in"),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Global => "Global",
            Region::UnitedStates => "United States",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::India => "India",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct NewsController {
    category: String,
    region: Region,
    articles: Vec<NewsArticle>,
    loading: bool,
    error: Option<String>,
    /// Latest issued fetch sequence number.
    seq: u64,
}

impl NewsController {
    pub fn new(theme: Theme) -> Self {
        Self {
            category: theme.config().default_category().to_string(),
            region: Region::default(),
            articles: Vec::new(),
            loading: false,
            error: None,
            seq: 0,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn articles(&self) -> &[NewsArticle] {
        &self.articles
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Theme switch: category falls back to the new theme's default, region
    /// is left untouched. Starts a fetch.
    pub fn apply_theme(&mut self, theme: Theme) -> u64 {
        self.category = theme.config().default_category().to_string();
        self.begin_fetch()
    }

    pub fn set_category(&mut self, category: String) -> u64 {
        self.category = category;
        self.begin_fetch()
    }

    pub fn set_region(&mut self, region: Region) -> u64 {
        self.region = region;
        self.begin_fetch()
    }

    /// Start a fetch for the current selection.
    pub fn begin_fetch(&mut self) -> u64 {
        self.loading = true;
        self.error = None;
        self.seq += 1;
        self.seq
    }

    /// Complete a fetch. Success replaces the articles wholesale; failure
    /// clears them and surfaces a generic error. Stale completions are
    /// dropped.
    pub fn finish(&mut self, seq: u64, outcome: Result<Vec<NewsArticle>, String>) {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "discarding stale news response");
            return;
        }
        match outcome {
            Ok(articles) => {
                self.articles = articles;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("news fetch failed: {}", err);
                self.articles.clear();
                self.error = Some(NEWS_ERROR.to_string());
            }
        }
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> NewsArticle {
        NewsArticle {
            title: title.into(),
            url: "https://example.com".into(),
            source: "Example".into(),
            description: None,
            image_url: None,
            published_at: None,
        }
    }

    #[test]
    fn test_defaults_track_theme() {
        assert_eq!(NewsController::new(Theme::Finance).category(), "business");
        assert_eq!(NewsController::new(Theme::Space).category(), "science");
        assert_eq!(NewsController::new(Theme::Finance).region(), Region::Global);
    }

    #[test]
    fn test_apply_theme_resets_category_keeps_region() {
        let mut news = NewsController::new(Theme::Finance);
        news.set_category("cryptocurrency".into());
        news.set_region(Region::Asia);
        news.apply_theme(Theme::Space);
        assert_eq!(news.category(), "science");
        assert_eq!(news.region(), Region::Asia);
        assert!(news.loading());
    }

    #[test]
    fn test_region_params() {
        assert_eq!(Region::Global.country_param(), None);
        assert_eq!(Region::UnitedStates.country_param(), Some("us"));
        assert_eq!(Region::Europe.country_param(), Some("eu"));
        assert_eq!(Region::Asia.country_param(), Some("asia"));
        assert_eq!(Region::India.country_param(), Some("in"));
    }

    #[test]
    fn test_success_replaces_articles_and_clears_error() {
        let mut news = NewsController::new(Theme::Finance);
        let seq = news.begin_fetch();
        news.finish(seq, Err("timeout".into()));
        assert_eq!(news.error(), Some(NEWS_ERROR));

        let seq = news.begin_fetch();
        assert!(news.error().is_none());
        news.finish(seq, Ok(vec![article("A"), article("B")]));
        assert_eq!(news.articles().len(), 2);
        assert!(news.error().is_none());
        assert!(!news.loading());
    }

    #[test]
    fn test_failure_clears_articles() {
        let mut news = NewsController::new(Theme::Space);
        let seq = news.begin_fetch();
        news.finish(seq, Ok(vec![article("A")]));

        let seq = news.begin_fetch();
        news.finish(seq, Err("backend down".into()));
        assert!(news.articles().is_empty());
        assert_eq!(news.error(), Some(NEWS_ERROR));
        assert!(!news.loading());
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut news = NewsController::new(Theme::Finance);
        let first = news.set_category("economy".into());
        let second = news.set_category("markets".into());
        news.finish(second, Ok(vec![article("markets")]));
        news.finish(first, Ok(vec![article("economy")]));
        assert_eq!(news.articles().len(), 1);
        assert_eq!(news.articles()[0].title, "markets");
        assert!(!news.loading());
    }
}
