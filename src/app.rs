//! Main application state and event loop glue.
//!
//! The host application around the tag input widget: it owns the widget,
//! the search cache and the search client, routes terminal events into the
//! widget, turns widget actions into searches and link openings, and
//! drains completed background searches.

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::{SearchClient, SearchParams};
use crate::cache::SearchCache;
use crate::config::Config;
use crate::error::Result;
use crate::events::Event;
use crate::model::TagRecord;
use crate::tasks::{SearchMessage, TaskSpawner};
use crate::ui::{TagInput, TagInputAction};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The main application struct that holds all state.
pub struct App {
    /// Application configuration.
    config: Config,
    /// The tag input widget.
    widget: TagInput,
    /// Session cache of search results.
    cache: SearchCache,
    /// Remote search client, when an endpoint is configured.
    client: Option<SearchClient>,
    /// Spawner for background searches.
    spawner: TaskSpawner,
    /// Status line shown under the widget.
    status: Option<String>,
    /// Whether the application should quit.
    should_quit: bool,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: Config, spawner: TaskSpawner) -> Result<Self> {
        let widget = TagInput::attach(config.widget.clone())?;
        let cache = SearchCache::new(config.widget.local_store);

        let client = if config.widget.call_url.is_empty() {
            None
        } else {
            match SearchClient::new(&config.widget.call_url, config.widget.call_method) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!(error = %e, "search client unavailable");
                    None
                }
            }
        };

        info!(
            remote_search = client.is_some(),
            local_store = cache.is_enabled(),
            "application ready"
        );

        Ok(Self {
            config,
            widget,
            cache,
            client,
            spawner,
            status: None,
            should_quit: false,
        })
    }

    /// Whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The current status line, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Import tag seeds in bulk, e.g. from a file given on the command
    /// line. A malformed payload is rejected whole.
    pub fn import_seeds(&mut self, source: &Value) -> Result<usize> {
        let added = self.widget.import_data(source)?;
        self.status = Some(format!("imported {} tags", added));
        Ok(added)
    }

    /// Tear down and return the confirmed tags.
    pub fn shutdown(self) -> Vec<TagRecord> {
        self.widget.detach()
    }

    /// Handle one event from the terminal.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => self.widget.handle_paste(&text),
            Event::Resize(_, _) => {}
            Event::Tick => self.on_tick(Instant::now()),
        }
    }

    /// Handle a key press.
    fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                debug!("quit requested");
                self.should_quit = true;
            }
            _ => {
                if let Some(action) = self.widget.handle_input(key) {
                    self.apply_action(action);
                }
            }
        }
    }

    /// Check the debounce deadline.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(params) = self.widget.poll_debounce(now) {
            self.request_search(params);
        }
    }

    /// React to a widget action.
    fn apply_action(&mut self, action: TagInputAction) {
        match action {
            TagInputAction::Added(record) => {
                self.status = Some(format!("added '{}'", record.text()));
            }
            TagInputAction::Removed(record) => {
                self.status = Some(format!("removed '{}'", record.text()));
            }
            TagInputAction::Confirmed(text) => {
                self.status = Some(format!("confirmed '{}'", text));
            }
            TagInputAction::CommittedAll(count) => {
                self.status = Some(format!("committed {} pending tags", count));
            }
            TagInputAction::SearchRequested(params) => self.request_search(params),
            TagInputAction::OpenLink(link) => self.open_link(&link),
        }
    }

    /// Serve a search from the cache or spawn a remote fetch.
    fn request_search(&mut self, params: SearchParams) {
        if let Some(seeds) = self.cache.get(params.term()) {
            debug!(term = params.term(), "search served from cache");
            let shown = self.widget.apply_search_results(&seeds);
            self.status = Some(format!("{} suggestions (cached)", shown));
            return;
        }

        match &self.client {
            Some(client) => {
                self.spawner.spawn_search(client, params);
                self.status = Some("searching...".to_string());
            }
            None => {
                self.widget.search_failed();
                self.status = Some("no search endpoint configured".to_string());
            }
        }
    }

    /// Handle a completed background search.
    ///
    /// Results are applied in arrival order; a stale response arriving
    /// after a newer one replaces the newer pending chips.
    pub fn handle_search_message(&mut self, message: SearchMessage) {
        match message {
            SearchMessage::SearchCompleted {
                term,
                result: Ok(seeds),
            } => {
                self.cache.put(&term, &seeds);
                let shown = self.widget.apply_search_results(&seeds);
                self.status = Some(format!("{} suggestions for '{}'", shown, term));
            }
            SearchMessage::SearchCompleted {
                term,
                result: Err(e),
            } => {
                warn!(term, error = %e, "search failed");
                self.widget.search_failed();
                self.status = Some(format!("search failed: {}", e));
            }
        }
    }

    /// Open a chip's link with the system handler.
    fn open_link(&mut self, link: &str) {
        if link == "#" {
            self.status = Some("tag has no link".to_string());
            return;
        }
        match open::that(link) {
            Ok(()) => self.status = Some(format!("opened {}", link)),
            Err(e) => {
                warn!(link, error = %e, "failed to open link");
                self.status = Some(format!("could not open {}", link));
            }
        }
    }

    /// Render the whole screen.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let widget_height = self.widget.required_height().min(area.height);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(widget_height),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let widget_area = Rect {
            width: self.config.widget.wrapper_width.min(chunks[0].width),
            ..chunks[0]
        };
        self.widget.render(frame, widget_area);

        if let Some(status) = &self.status {
            let status_line = Paragraph::new(status.as_str())
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(status_line, chunks[2]);
        }

        self.render_help(frame, chunks[3]);
    }

    /// Render the key hint bar.
    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let help = Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(": add/confirm  "),
            Span::styled("Bksp", Style::default().fg(Color::Yellow)),
            Span::raw(": delete last  "),
            Span::styled("←/→", Style::default().fg(Color::Yellow)),
            Span::raw(": select  "),
            Span::styled("Ctrl+F", Style::default().fg(Color::Green)),
            Span::raw(": search/commit  "),
            Span::styled("Ctrl+O", Style::default().fg(Color::Green)),
            Span::raw(": open link  "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(": quit"),
        ]);
        frame.render_widget(Paragraph::new(help), area);
    }
}
