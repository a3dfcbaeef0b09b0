//! Research theme configuration
//!
//! A theme scopes the vocabulary of the whole app: hero copy, filter chips,
//! sample queries, and the news category taxonomy. Resolution is pure and
//! recomputed on every call.

use std::fmt;

/// Top-level research domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Finance,
    Space,
}

/// Display and query configuration derived from a [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeConfig {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub hero_image: &'static str,
    pub filter_chips: &'static [&'static str],
    pub sample_queries: &'static [&'static str],
    pub news_categories: &'static [&'static str],
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Finance, Theme::Space];

    /// Resolve the full configuration for this theme. Total, no failure mode.
    pub fn config(self) -> ThemeConfig {
        match self {
            Theme::Finance => ThemeConfig {
                title: "Finance",
                subtitle: "AI-Powered Financial Research",
                hero_image: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?crop=entropy&cs=srgb&fm=jpg&q=85",
                filter_chips: &["News", "Stocks", "Wealth", "Budgets"],
                sample_queries: &[
                    "What is the current state of the stock market?",
                    "Explain cryptocurrency trends in 2024",
                    "How to build a diversified investment portfolio?",
                ],
                news_categories: &["business", "economy", "markets", "cryptocurrency"],
            },
            Theme::Space => ThemeConfig {
                title: "Space",
                subtitle: "AI-Powered Space Research",
                hero_image: "https://images.unsplash.com/photo-1484931575886-a5f4df44d5b7?crop=entropy&cs=srgb&fm=jpg&q=85",
                filter_chips: &["Astronomy", "Stars", "Galaxies", "Developments"],
                sample_queries: &[
                    "What are the latest discoveries from James Webb telescope?",
                    "Explain black holes and their formation",
                    "Recent developments in Mars exploration",
                ],
                news_categories: &["science", "technology", "astronomy", "space"],
            },
        }
    }
}

impl ThemeConfig {
    /// The news category a freshly selected theme starts on.
    pub fn default_category(&self) -> &'static str {
        self.news_categories[0]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config().title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configs_are_non_empty() {
        for theme in Theme::ALL {
            let cfg = theme.config();
            assert!(!cfg.filter_chips.is_empty());
            assert!(!cfg.sample_queries.is_empty());
            assert!(!cfg.news_categories.is_empty());
            assert!(!cfg.title.is_empty());
            assert!(!cfg.hero_image.is_empty());
        }
    }

    #[test]
    fn test_configs_are_distinct_per_theme() {
        let finance = Theme::Finance.config();
        let space = Theme::Space.config();
        assert_ne!(finance.filter_chips, space.filter_chips);
        assert_ne!(finance.sample_queries, space.sample_queries);
        assert_ne!(finance.news_categories, space.news_categories);
    }

    #[test]
    fn test_resolution_is_stable() {
        for theme in Theme::ALL {
            assert_eq!(theme.config(), theme.config());
        }
    }

    #[test]
    fn test_default_category_is_first() {
        assert_eq!(Theme::Finance.config().default_category(), "business");
        assert_eq!(Theme::Space.config().default_category(), "science");
    }
}
