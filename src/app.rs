//! Core application state and Iced implementation
//!
//! Composition root: owns the active theme, the filter chip selection, and
//! the three controllers (query dispatch, history, news). All backend I/O is
//! issued as `Task`s whose completions come back as messages; each controller
//! tags its requests with a sequence number and drops stale completions.

use iced::widget::{button, column, container, pick_list, row, scrollable, text, text_input, Space};
use iced::{Background, Border, Color, Element, Length, Padding, Task};

use crate::backend::api::BackendClient;
use crate::backend::types::{DispatchMode, HistoryEntry, NewsArticle, ResearchResponse, SearchHit};
use crate::history::HistoryStore;
use crate::news::{NewsController, Region};
use crate::query::{QueryDispatcher, QueryResult};
use crate::theme::Theme;

/// Filter chip meaning "no grouping".
const FILTER_ALL: &str = "all";

// ============================================================================
// Theme Colors
// ============================================================================

mod colors {
    use iced::Color;

    use crate::theme::Theme;

    pub const BACKGROUND: Color = Color::from_rgb(0.07, 0.08, 0.10);
    pub const SURFACE: Color = Color::from_rgb(0.11, 0.12, 0.15);
    pub const SURFACE_HIGHLIGHT: Color = Color::from_rgb(0.16, 0.17, 0.21);
    pub const BORDER: Color = Color::from_rgb(0.22, 0.23, 0.27);
    pub const TEXT: Color = Color::from_rgb(0.94, 0.94, 0.95);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.56, 0.57, 0.62);
    pub const TEXT_PLACEHOLDER: Color = Color::from_rgb(0.40, 0.41, 0.46);
    pub const ERROR: Color = Color::from_rgb(0.90, 0.35, 0.35);

    /// Accent color scoped to the active research theme.
    pub fn accent(theme: Theme) -> Color {
        match theme {
            Theme::Finance => Color::from_rgb(0.25, 0.75, 0.55),
            Theme::Space => Color::from_rgb(0.55, 0.50, 0.95),
        }
    }
}

// ============================================================================
// Application State
// ============================================================================

pub struct FinanceSpace {
    theme: Theme,
    active_filter: String,
    dispatcher: QueryDispatcher,
    history: HistoryStore,
    news: NewsController,
    backend: BackendClient,
}

#[derive(Debug, Clone)]
pub enum Message {
    ThemeSwitched(Theme),
    QueryChanged(String),
    DispatchRequested(DispatchMode),
    SampleQueryPicked(String),
    FilterChipPicked(String),
    ResearchComplete(u64, Result<ResearchResponse, String>),
    HistoryLoaded(u64, Result<Vec<HistoryEntry>, String>),
    NewsCategoryPicked(String),
    NewsRegionPicked(Region),
    NewsLoaded(u64, Result<Vec<NewsArticle>, String>),
}

impl FinanceSpace {
    pub fn new(base_url: String) -> (Self, Task<Message>) {
        let mut app = Self {
            theme: Theme::default(),
            active_filter: FILTER_ALL.to_string(),
            dispatcher: QueryDispatcher::new(),
            history: HistoryStore::new(),
            news: NewsController::new(Theme::default()),
            backend: BackendClient::new(&base_url),
        };
        let history = app.refresh_history();
        let news_seq = app.news.begin_fetch();
        let news = app.fetch_news(news_seq);
        (app, Task::batch([history, news]))
    }

    pub fn title(&self) -> String {
        String::from("FinanceSpace")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ThemeSwitched(theme) => {
                let changed = theme != self.theme;
                self.theme = theme;
                self.dispatcher.clear_result();
                self.active_filter = FILTER_ALL.to_string();
                if changed {
                    let seq = self.news.apply_theme(theme);
                    self.fetch_news(seq)
                } else {
                    Task::none()
                }
            }

            Message::QueryChanged(query) => {
                self.dispatcher.set_query_text(query);
                Task::none()
            }

            Message::DispatchRequested(mode) => self.dispatch(mode),

            Message::SampleQueryPicked(sample) => {
                self.dispatcher.set_query_text(sample);
                self.dispatch(DispatchMode::Combined)
            }

            Message::FilterChipPicked(chip) => {
                // Display-only grouping; has no effect on results or news.
                self.active_filter = chip;
                Task::none()
            }

            Message::ResearchComplete(seq, outcome) => {
                if self.dispatcher.finish(seq, outcome) {
                    self.refresh_history()
                } else {
                    Task::none()
                }
            }

            Message::HistoryLoaded(seq, outcome) => {
                self.history.apply(seq, outcome);
                Task::none()
            }

            Message::NewsCategoryPicked(category) => {
                let seq = self.news.set_category(category);
                self.fetch_news(seq)
            }

            Message::NewsRegionPicked(region) => {
                let seq = self.news.set_region(region);
                self.fetch_news(seq)
            }

            Message::NewsLoaded(seq, outcome) => {
                self.news.finish(seq, outcome);
                Task::none()
            }
        }
    }

    pub fn theme(&self) -> iced::Theme {
        iced::Theme::Dark
    }

    // ========================================================================
    // Backend Tasks
    // ========================================================================

    fn dispatch(&mut self, mode: DispatchMode) -> Task<Message> {
        let Some(seq) = self.dispatcher.begin(mode) else {
            return Task::none();
        };
        let client = self.backend.clone();
        let query = self.dispatcher.query_text().to_string();
        Task::perform(
            async move { client.research(mode, &query).await },
            move |outcome| Message::ResearchComplete(seq, outcome),
        )
    }

    fn refresh_history(&mut self) -> Task<Message> {
        let seq = self.history.begin_refresh();
        let client = self.backend.clone();
        Task::perform(async move { client.history().await }, move |outcome| {
            Message::HistoryLoaded(seq, outcome)
        })
    }

    fn fetch_news(&self, seq: u64) -> Task<Message> {
        let client = self.backend.clone();
        let category = self.news.category().to_string();
        let region = self.news.region().country_param();
        Task::perform(
            async move { client.news(&category, region).await },
            move |outcome| Message::NewsLoaded(seq, outcome),
        )
    }

    // ========================================================================
    // View
    // ========================================================================

    pub fn view(&self) -> Element<'_, Message> {
        let content = column![
            self.view_header(),
            Space::with_height(16),
            self.view_hero(),
            Space::with_height(12),
            self.view_filters(),
            Space::with_height(16),
            row![
                container(self.view_results()).width(Length::FillPortion(2)),
                container(self.view_sidebar()).width(Length::FillPortion(1)),
            ]
            .spacing(16),
            Space::with_height(24),
            self.view_news(),
        ]
        .spacing(0);

        container(scrollable(container(content).padding(24)).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(colors::BACKGROUND)),
                ..Default::default()
            })
            .into()
    }

    fn view_header(&self) -> Element<'_, Message> {
        let logo = row(Theme::ALL.map(|theme| {
            let active = theme == self.theme;
            button(
                text(theme.config().title).size(20).color(if active {
                    colors::accent(self.theme)
                } else {
                    colors::TEXT_MUTED
                }),
            )
            .on_press(Message::ThemeSwitched(theme))
            .padding(Padding::from([6.0, 10.0]))
            .style(|_theme, _status| button::Style {
                background: Some(Background::Color(Color::TRANSPARENT)),
                text_color: colors::TEXT,
                ..button::Style::default()
            })
            .into()
        }))
        .spacing(4);

        let placeholder = format!("Search {} topics...", self.theme.config().title);
        let accent = colors::accent(self.theme);
        let search_input = text_input(&placeholder, self.dispatcher.query_text())
            .on_input(Message::QueryChanged)
            .on_submit(Message::DispatchRequested(DispatchMode::Combined))
            .padding(Padding::new(12.0))
            .size(16)
            .style(move |_theme, _status| text_input::Style {
                background: Background::Color(colors::SURFACE),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 10.0.into(),
                },
                icon: colors::TEXT_MUTED,
                placeholder: colors::TEXT_PLACEHOLDER,
                value: colors::TEXT,
                selection: accent,
            });

        let search_label = if self.dispatcher.loading() {
            "Searching..."
        } else {
            "Search"
        };
        let search_button = self.action_button(search_label, DispatchMode::Combined);

        row![
            logo,
            Space::with_width(24),
            search_input,
            Space::with_width(8),
            search_button
        ]
        .align_y(iced::Alignment::Center)
        .into()
    }

    fn view_hero(&self) -> Element<'_, Message> {
        let cfg = self.theme.config();
        let actions = row![
            self.action_button("AI Research", DispatchMode::Combined),
            self.action_button("Web Search", DispatchMode::Search),
        ]
        .spacing(8);

        container(
            column![
                text(format!("{}Space", cfg.title))
                    .size(34)
                    .color(colors::accent(self.theme)),
                text(cfg.subtitle).size(16).color(colors::TEXT_MUTED),
                text(cfg.hero_image).size(11).color(colors::TEXT_PLACEHOLDER),
                Space::with_height(12),
                actions,
            ]
            .spacing(4),
        )
        .padding(24)
        .width(Length::Fill)
        .style(surface_card)
        .into()
    }

    fn view_filters(&self) -> Element<'_, Message> {
        let cfg = self.theme.config();
        let mut chips: Vec<Element<'_, Message>> = vec![self.filter_chip("All", FILTER_ALL)];
        for chip in cfg.filter_chips {
            chips.push(self.filter_chip(chip, chip));
        }
        row(chips).spacing(8).into()
    }

    fn filter_chip<'a>(&'a self, label: &'a str, value: &'a str) -> Element<'a, Message> {
        let active = self.active_filter == value;
        let accent = colors::accent(self.theme);
        button(text(label).size(13).color(if active {
            colors::BACKGROUND
        } else {
            colors::TEXT
        }))
        .on_press(Message::FilterChipPicked(value.to_string()))
        .padding(Padding::from([6.0, 14.0]))
        .style(move |_theme, _status| button::Style {
            background: Some(Background::Color(if active {
                accent
            } else {
                colors::SURFACE_HIGHLIGHT
            })),
            text_color: colors::TEXT,
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 14.0.into(),
            },
            ..button::Style::default()
        })
        .into()
    }

    fn view_results(&self) -> Element<'_, Message> {
        if self.dispatcher.loading() {
            return card(
                column![text("Processing your query...")
                    .size(15)
                    .color(colors::TEXT_MUTED)]
                .into(),
            );
        }

        match self.dispatcher.result() {
            Some(QueryResult::Failure { message, query }) => card(
                column![
                    text("Error").size(18).color(colors::ERROR),
                    text(message).size(14).color(colors::TEXT),
                    text(format!("Query: {}", query))
                        .size(13)
                        .color(colors::TEXT_MUTED),
                ]
                .spacing(6)
                .into(),
            ),
            Some(QueryResult::Research(body)) => self.view_research(body),
            None => self.view_sample_queries(),
        }
    }

    /// Every populated field of the response renders as its own card; the
    /// fields are not mutually exclusive.
    fn view_research<'a>(&'a self, body: &'a ResearchResponse) -> Element<'a, Message> {
        let mut cards: Vec<Element<'_, Message>> = Vec::new();

        if let Some(summary) = body.summary() {
            cards.push(titled_card("AI Summary", text(summary).size(14).color(colors::TEXT).into()));
        }
        if let Some(answer) = body.answer() {
            cards.push(titled_card("AI Response", text(answer).size(14).color(colors::TEXT).into()));
        }
        if !body.search_results.is_empty() {
            cards.push(titled_card("Related Information", search_grid(&body.search_results)));
        }
        if !body.results.is_empty() {
            cards.push(titled_card("Search Results", search_grid(&body.results)));
        }

        column(cards).spacing(12).into()
    }

    fn view_sample_queries(&self) -> Element<'_, Message> {
        let cfg = self.theme.config();
        let samples: Vec<Element<'_, Message>> = cfg
            .sample_queries
            .iter()
            .map(|sample| {
                button(text(*sample).size(14).color(colors::TEXT))
                    .on_press(Message::SampleQueryPicked(sample.to_string()))
                    .padding(Padding::new(12.0))
                    .width(Length::Fill)
                    .style(|_theme, _status| button::Style {
                        background: Some(Background::Color(colors::SURFACE_HIGHLIGHT)),
                        text_color: colors::TEXT,
                        border: Border::default().rounded(8),
                        ..button::Style::default()
                    })
                    .into()
            })
            .collect();

        titled_card("Try these sample queries:", column(samples).spacing(8).into())
    }

    fn view_sidebar(&self) -> Element<'_, Message> {
        let history_items: Vec<Element<'_, Message>> = self
            .history
            .recent()
            .iter()
            .map(|entry| {
                column![
                    text(&entry.query).size(13).color(colors::TEXT),
                    text(&entry.kind).size(11).color(colors::TEXT_MUTED),
                ]
                .spacing(2)
                .into()
            })
            .collect();

        let history_section = if history_items.is_empty() {
            titled_card(
                "Recent Queries",
                text("No queries yet").size(13).color(colors::TEXT_MUTED).into(),
            )
        } else {
            titled_card("Recent Queries", column(history_items).spacing(10).into())
        };

        let quick_actions = titled_card(
            "Quick Actions",
            column![
                self.action_button("AI Only", DispatchMode::Query),
                self.action_button("Search Only", DispatchMode::Search),
                self.action_button("Combined", DispatchMode::Combined),
            ]
            .spacing(8)
            .into(),
        );

        column![history_section, Space::with_height(12), quick_actions].into()
    }

    fn view_news(&self) -> Element<'_, Message> {
        let cfg = self.theme.config();
        let heading = match self.theme {
            Theme::Finance => "Latest Financial News",
            Theme::Space => "Latest Space News",
        };

        let category_chips: Vec<Element<'_, Message>> = cfg
            .news_categories
            .iter()
            .map(|category| {
                let active = self.news.category() == *category;
                let accent = colors::accent(self.theme);
                button(text(capitalize(category)).size(13).color(if active {
                    colors::BACKGROUND
                } else {
                    colors::TEXT
                }))
                .on_press(Message::NewsCategoryPicked(category.to_string()))
                .padding(Padding::from([6.0, 14.0]))
                .style(move |_theme, _status| button::Style {
                    background: Some(Background::Color(if active {
                        accent
                    } else {
                        colors::SURFACE_HIGHLIGHT
                    })),
                    text_color: colors::TEXT,
                    border: Border::default().rounded(14),
                    ..button::Style::default()
                })
                .into()
            })
            .collect();

        let region_picker = pick_list(
            Region::ALL,
            Some(self.news.region()),
            Message::NewsRegionPicked,
        )
        .padding(Padding::from([6.0, 10.0]))
        .text_size(13);

        let header = row![
            text(heading).size(20).color(colors::TEXT),
            Space::with_width(Length::Fill),
            row(category_chips).spacing(6),
            Space::with_width(12),
            region_picker,
        ]
        .align_y(iced::Alignment::Center);

        // Loading beats error beats empty state beats the article grid.
        let body: Element<'_, Message> = if self.news.loading() {
            card(text("Loading news...").size(14).color(colors::TEXT_MUTED).into())
        } else if let Some(error) = self.news.error() {
            card(
                column![
                    text("Error").size(16).color(colors::ERROR),
                    text(error).size(14).color(colors::TEXT),
                ]
                .spacing(4)
                .into(),
            )
        } else if self.news.articles().is_empty() {
            card(
                text("No news articles found. Try a different category or region.")
                    .size(14)
                    .color(colors::TEXT_MUTED)
                    .into(),
            )
        } else {
            let articles: Vec<Element<'_, Message>> = self
                .news
                .articles()
                .iter()
                .map(news_card)
                .collect();
            column(articles).spacing(10).into()
        };

        column![header, Space::with_height(12), body].into()
    }

    /// Research action button. Advisory gate only: the button is disabled
    /// while loading or while the trimmed query is blank, and the dispatcher
    /// enforces the same precondition when the message does arrive.
    fn action_button<'a>(&'a self, label: &'a str, mode: DispatchMode) -> Element<'a, Message> {
        let accent = colors::accent(self.theme);
        let mut btn = button(text(label).size(14).color(colors::TEXT))
            .padding(Padding::from([8.0, 16.0]))
            .style(move |_theme, _status| button::Style {
                background: Some(Background::Color(accent)),
                text_color: colors::BACKGROUND,
                border: Border::default().rounded(8),
                ..button::Style::default()
            });
        if self.dispatcher.can_dispatch() {
            btn = btn.on_press(Message::DispatchRequested(mode));
        }
        btn.into()
    }
}

// ============================================================================
// View Helpers
// ============================================================================

fn surface_card(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::SURFACE)),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    }
}

fn card(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(surface_card)
        .into()
}

fn titled_card<'a>(title: &'a str, content: Element<'a, Message>) -> Element<'a, Message> {
    card(
        column![
            text(title).size(16).color(colors::TEXT),
            Space::with_height(8),
            content
        ]
        .into(),
    )
}

fn search_grid(hits: &[SearchHit]) -> Element<'_, Message> {
    let items: Vec<Element<'_, Message>> = hits
        .iter()
        .map(|hit| {
            container(
                column![
                    text(&hit.title).size(14).color(colors::TEXT),
                    text(&hit.snippet).size(13).color(colors::TEXT_MUTED),
                    text(&hit.url).size(12).color(colors::TEXT_PLACEHOLDER),
                ]
                .spacing(4),
            )
            .padding(12)
            .width(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(colors::SURFACE_HIGHLIGHT)),
                border: Border::default().rounded(8),
                ..Default::default()
            })
            .into()
        })
        .collect();
    column(items).spacing(8).into()
}

fn news_card(article: &NewsArticle) -> Element<'_, Message> {
    let mut lines: Vec<Element<'_, Message>> =
        vec![text(&article.title).size(15).color(colors::TEXT).into()];
    if let Some(description) = &article.description {
        lines.push(text(description).size(13).color(colors::TEXT_MUTED).into());
    }
    let mut meta: Vec<Element<'_, Message>> =
        vec![text(&article.source).size(12).color(colors::TEXT_PLACEHOLDER).into()];
    if let Some(published_at) = &article.published_at {
        meta.push(
            text(published_at)
                .size(12)
                .color(colors::TEXT_PLACEHOLDER)
                .into(),
        );
    }
    lines.push(row(meta).spacing(12).into());
    lines.push(text(&article.url).size(12).color(colors::TEXT_PLACEHOLDER).into());

    container(column(lines).spacing(4))
        .padding(14)
        .width(Length::Fill)
        .style(surface_card)
        .into()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app() -> FinanceSpace {
        let (app, _boot) = FinanceSpace::new("http://127.0.0.1:8000".into());
        app
    }

    fn response(value: serde_json::Value) -> ResearchResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_startup_issues_history_and_news_requests() {
        let app = app();
        assert!(app.history.in_flight());
        assert!(app.news.loading());
        assert_eq!(app.news.category(), "business");
    }

    #[test]
    fn test_combined_dispatch_end_to_end() {
        let mut app = app();
        let _ = app.update(Message::QueryChanged(
            "What is the current state of the stock market?".into(),
        ));
        let _ = app.update(Message::DispatchRequested(DispatchMode::Combined));
        assert!(app.dispatcher.loading());
        assert_eq!(app.dispatcher.mode(), DispatchMode::Combined);

        let _ = app.update(Message::ResearchComplete(
            1,
            Ok(response(json!({
                "ai_summary": "Markets are mixed",
                "search_results": [{ "title": "A", "snippet": "B", "url": "C" }]
            }))),
        ));
        assert!(!app.dispatcher.loading());
        match app.dispatcher.result().unwrap() {
            QueryResult::Research(body) => {
                assert_eq!(body.ai_summary.as_deref(), Some("Markets are mixed"));
                assert_eq!(body.search_results.len(), 1);
                assert_eq!(body.search_results[0].title, "A");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        // Success chains exactly one history refresh.
        assert!(app.history.in_flight());
    }

    #[test]
    fn test_failed_dispatch_keeps_history_untouched() {
        let mut app = app();
        let _ = app.update(Message::HistoryLoaded(1, Ok(vec![])));
        let _ = app.update(Message::QueryChanged("doomed".into()));
        let _ = app.update(Message::DispatchRequested(DispatchMode::Query));
        let _ = app.update(Message::ResearchComplete(1, Err("boom".into())));
        match app.dispatcher.result().unwrap() {
            QueryResult::Failure { query, .. } => assert_eq!(query, "doomed"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!app.history.in_flight());
    }

    #[test]
    fn test_theme_switch_resets_result_and_filter_keeps_query() {
        let mut app = app();
        let _ = app.update(Message::QueryChanged("stock market".into()));
        let _ = app.update(Message::DispatchRequested(DispatchMode::Combined));
        let _ = app.update(Message::ResearchComplete(
            1,
            Ok(response(json!({ "response": "hello" }))),
        ));
        let _ = app.update(Message::FilterChipPicked("Stocks".into()));
        assert_eq!(app.active_filter, "Stocks");

        let _ = app.update(Message::ThemeSwitched(Theme::Space));
        assert_eq!(app.theme, Theme::Space);
        assert!(app.dispatcher.result().is_none());
        assert_eq!(app.active_filter, FILTER_ALL);
        assert_eq!(app.dispatcher.query_text(), "stock market");
        // News category follows the new theme; fetch restarted.
        assert_eq!(app.news.category(), "science");
        assert!(app.news.loading());
    }

    #[test]
    fn test_same_theme_click_does_not_reset_news_category() {
        let mut app = app();
        let _ = app.update(Message::NewsCategoryPicked("cryptocurrency".into()));
        let _ = app.update(Message::ThemeSwitched(Theme::Finance));
        assert_eq!(app.news.category(), "cryptocurrency");
        assert!(app.dispatcher.result().is_none());
        assert_eq!(app.active_filter, FILTER_ALL);
    }

    #[test]
    fn test_sample_query_sets_text_and_dispatches_combined() {
        let mut app = app();
        let sample = "Explain black holes and their formation";
        let _ = app.update(Message::SampleQueryPicked(sample.into()));
        assert_eq!(app.dispatcher.query_text(), sample);
        assert!(app.dispatcher.loading());
        assert_eq!(app.dispatcher.mode(), DispatchMode::Combined);
    }

    #[test]
    fn test_blank_query_does_not_dispatch() {
        let mut app = app();
        let _ = app.update(Message::QueryChanged("   ".into()));
        let _ = app.update(Message::DispatchRequested(DispatchMode::Search));
        assert!(!app.dispatcher.loading());
        assert!(app.dispatcher.result().is_none());
    }

    #[test]
    fn test_filter_chip_is_display_only() {
        let mut app = app();
        let _ = app.update(Message::NewsLoaded(1, Ok(vec![])));
        let _ = app.update(Message::FilterChipPicked("Wealth".into()));
        assert_eq!(app.active_filter, "Wealth");
        assert!(!app.news.loading());
        assert!(!app.dispatcher.loading());
    }

    #[test]
    fn test_accent_color_is_theme_scoped() {
        assert_ne!(colors::accent(Theme::Finance), colors::accent(Theme::Space));
    }

    #[test]
    fn test_region_change_triggers_fetch() {
        let mut app = app();
        let _ = app.update(Message::NewsLoaded(1, Ok(vec![])));
        assert!(!app.news.loading());
        let _ = app.update(Message::NewsRegionPicked(Region::UnitedStates));
        assert_eq!(app.news.region(), Region::UnitedStates);
        assert!(app.news.loading());
    }
}
