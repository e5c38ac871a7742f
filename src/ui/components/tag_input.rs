//! The tag input widget.
//!
//! Owns the tag collection, the embedded text input, the search state
//! machine and the debounce deadline. Key handling returns actions for the
//! host loop (spawn a search, open a link); the configured hooks fire
//! exactly once per tag added, tag removed and search completed.
//!
//! ## Interaction model
//!
//! - Type and press Enter to add a tag; the input clears.
//! - Backspace on an empty input deletes the last tag.
//! - With the input empty, Left/Right selects a chip; Delete removes a
//!   confirmed chip, Enter confirms a pending one, Ctrl+O opens its link.
//! - Ctrl+F searches with the current text. While search results are
//!   pending, Ctrl+F instead commits every remaining pending tag.
//! - With auto-search enabled, typing re-arms a single debounce deadline;
//!   only the last keystroke of a burst triggers a search.

use std::fmt;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde_json::Value;
use tracing::{debug, trace};

use super::input::TextInput;
use crate::api::SearchParams;
use crate::config::WidgetConfig;
use crate::error::{AppError, Result};
use crate::model::{TagCollection, TagRecord};
use crate::ui::layout::{self, ChipBox};

/// Search-related state of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No search activity.
    #[default]
    Idle,
    /// A debounce deadline is armed or a search is in flight.
    AwaitingDebounce,
    /// Search results are displayed as pending chips.
    PendingSearch,
}

/// Action resulting from widget input, to be handled by the host loop.
#[derive(Debug, Clone, PartialEq)]
pub enum TagInputAction {
    /// A tag was added to the collection.
    Added(TagRecord),
    /// A tag was removed from the collection.
    Removed(TagRecord),
    /// A search should be issued with these parameters.
    SearchRequested(SearchParams),
    /// A single pending tag was confirmed (by text).
    Confirmed(String),
    /// Every remaining pending tag was committed (count).
    CommittedAll(usize),
    /// The selected chip's link should be opened.
    OpenLink(String),
}

/// External callbacks invoked by the widget.
///
/// Each hook fires exactly once per corresponding transition. Unset hooks
/// are no-ops.
#[derive(Default)]
pub struct Hooks {
    /// Invoked after a tag is added to the collection.
    pub on_tag_added: Option<Box<dyn FnMut(&TagRecord)>>,
    /// Invoked after a tag is removed from the collection.
    pub on_tag_removed: Option<Box<dyn FnMut(&TagRecord)>>,
    /// Invoked after search results have been applied.
    pub on_search_completed: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_tag_added", &self.on_tag_added.is_some())
            .field("on_tag_removed", &self.on_tag_removed.is_some())
            .field("on_search_completed", &self.on_search_completed.is_some())
            .finish()
    }
}

/// The tag input widget.
#[derive(Debug)]
pub struct TagInput {
    /// Widget settings.
    config: WidgetConfig,
    /// The tags in display order.
    tags: TagCollection,
    /// The embedded text input.
    input: TextInput,
    /// Search state machine.
    state: SearchState,
    /// When the next automatic search fires. At most one deadline exists;
    /// arming overwrites any prior one, so the last keystroke wins.
    debounce_deadline: Option<Instant>,
    /// Chip selected for keyboard actions, by collection index.
    selected: Option<usize>,
    /// External callbacks.
    hooks: Hooks,
}

impl TagInput {
    /// Attach a new widget instance with the given settings.
    ///
    /// The collection starts empty. Fails when the settings are invalid.
    pub fn attach(config: WidgetConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            wrapper = config.wrapper_width,
            content = config.content_width,
            auto_search = config.auto_search,
            "tag input attached"
        );
        let input = TextInput::with_placeholder(config.placeholder.clone());
        Ok(Self {
            config,
            tags: TagCollection::new(),
            input,
            state: SearchState::Idle,
            debounce_deadline: None,
            selected: None,
            hooks: Hooks::default(),
        })
    }

    /// Replace the widget's hooks.
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Detach the widget: discard pending tags and all transient state,
    /// yielding the confirmed tags.
    pub fn detach(self) -> Vec<TagRecord> {
        debug!(tags = self.tags.len(), "tag input detached");
        self.tags
            .into_tags()
            .into_iter()
            .filter(|t| !t.pending())
            .collect()
    }

    /// The current search state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The tags in display order.
    pub fn tags(&self) -> &TagCollection {
        &self.tags
    }

    /// The current input text.
    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    /// The selected chip index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Import seeds in bulk.
    ///
    /// `source` must be a JSON array of seeds, or an object whose values
    /// are seeds; each seed must be a string, number or object. A payload
    /// that violates this is rejected whole, with no partial application.
    /// Duplicate and empty-text seeds are skipped silently. Returns the
    /// number of tags added. Hooks do not fire for imported tags.
    pub fn import_data(&mut self, source: &Value) -> Result<usize> {
        let seeds: Vec<&Value> = match source {
            Value::Array(items) => items.iter().collect(),
            Value::Object(map) => map.values().collect(),
            _ => {
                return Err(AppError::malformed_input(
                    "expected an array or object of tag seeds",
                ))
            }
        };

        for (index, seed) in seeds.iter().enumerate() {
            if !matches!(seed, Value::String(_) | Value::Number(_) | Value::Object(_)) {
                return Err(AppError::malformed_input(format!(
                    "seed {} is not a string, number or object",
                    index
                )));
            }
        }

        let mut added = 0;
        for seed in seeds {
            if self.tags.add(TagRecord::from_seed(seed)) {
                added += 1;
            }
        }
        debug!(added, "seeds imported");
        Ok(added)
    }

    /// Handle keyboard input.
    ///
    /// Returns an action for the host loop when one is required.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<TagInputAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, KeyModifiers::NONE) => {
                if !self.input.is_empty() {
                    return self.insert_from_input();
                }
                self.confirm_selected()
            }
            (KeyCode::Backspace, KeyModifiers::NONE) if self.input.is_empty() => {
                let last = self.tags.last().map(|t| t.text().to_string())?;
                self.remove_tag(&last)
            }
            (KeyCode::Delete, KeyModifiers::NONE) if self.input.is_empty() => {
                let index = self.selected?;
                let record = self.tags.get(index)?;
                if record.pending() {
                    return None;
                }
                let text = record.text().to_string();
                self.remove_tag(&text)
            }
            (KeyCode::Left, KeyModifiers::NONE)
                if self.input.is_empty() && !self.tags.is_empty() =>
            {
                self.selected = Some(match self.selected {
                    None => self.tags.len() - 1,
                    Some(0) => 0,
                    Some(i) => i - 1,
                });
                None
            }
            (KeyCode::Right, KeyModifiers::NONE)
                if self.input.is_empty() && !self.tags.is_empty() =>
            {
                self.selected = match self.selected {
                    Some(i) if i + 1 < self.tags.len() => Some(i + 1),
                    _ => None,
                };
                None
            }
            (KeyCode::Char('f'), KeyModifiers::CONTROL) => self.search_trigger(),
            (KeyCode::Char('o'), KeyModifiers::CONTROL) => {
                let record = self.tags.get(self.selected?)?;
                Some(TagInputAction::OpenLink(record.link().to_string()))
            }
            _ => {
                if self.input.handle_input(key) {
                    self.selected = None;
                    self.arm_debounce();
                }
                None
            }
        }
    }

    /// Handle pasted text.
    pub fn handle_paste(&mut self, text: &str) {
        self.input.insert_str(text);
        self.selected = None;
        self.arm_debounce();
    }

    /// Check the debounce deadline.
    ///
    /// Returns the search to issue when the deadline has passed and the
    /// input still holds a term. The host loop calls this on every tick.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<SearchParams> {
        let deadline = self.debounce_deadline?;
        if now < deadline {
            return None;
        }
        self.debounce_deadline = None;

        let params = SearchParams::new(self.input.value());
        if params.is_empty() {
            self.settle_state();
            return None;
        }
        trace!(term = params.term(), "debounce fired");
        Some(params)
    }

    /// Apply the seeds of a completed search.
    ///
    /// Clears any stale pending chips first, then adds each non-duplicate
    /// seed as a pending tag. A response from an older search arriving
    /// after a newer one replaces the newer pending set the same way.
    /// Returns the number of pending tags displayed.
    pub fn apply_search_results(&mut self, seeds: &[Value]) -> usize {
        let stale = self.tags.remove_where(true);
        if stale > 0 {
            trace!(stale, "cleared stale pending chips");
        }

        let mut added = 0;
        for seed in seeds {
            let mut record = TagRecord::from_seed(seed);
            if record.is_empty() || self.tags.exists(record.text()) {
                continue;
            }
            record.mark_pending();
            if self.tags.add(record) {
                added += 1;
            }
        }

        self.selected = None;
        self.state = if added > 0 {
            SearchState::PendingSearch
        } else {
            SearchState::Idle
        };
        debug!(added, "search results applied");

        if let Some(hook) = self.hooks.on_search_completed.as_mut() {
            hook();
        }
        added
    }

    /// Note that an issued search failed.
    ///
    /// The widget stays in its pre-search state; there is nothing to undo.
    pub fn search_failed(&mut self) {
        if self.state == SearchState::AwaitingDebounce {
            self.settle_state();
        }
    }

    /// Height the widget needs for its current content, borders included.
    pub fn required_height(&self) -> u16 {
        let chip_layout = layout::layout(
            &self.chip_boxes(),
            self.config.content_width,
            self.config.min_input_width,
        );
        chip_layout
            .required_height(self.config.row_height.max(1))
            .saturating_add(2)
    }

    /// Render the widget.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = match self.state {
            SearchState::PendingSearch => Style::default().fg(Color::Yellow),
            SearchState::AwaitingDebounce => Style::default().fg(Color::Cyan),
            SearchState::Idle => Style::default(),
        };
        let block = Block::default()
            .title(" Tags ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let content_width = self.config.content_width.min(inner.width);
        let min_input_width = self.config.min_input_width.min(content_width);
        let row_height = self.config.row_height.max(1);

        let boxes = self.chip_boxes();
        let chip_layout = layout::layout(&boxes, content_width, min_input_width);

        for (row_index, row) in chip_layout.rows.iter().enumerate() {
            let y = inner.y + (row_index as u16).saturating_mul(row_height);
            if y >= inner.y + inner.height {
                break;
            }
            let mut spans = Vec::new();
            for &chip_index in row {
                let record = match self.tags.get(chip_index) {
                    Some(record) => record,
                    None => continue,
                };
                if let Some(mut span) = record.render() {
                    if self.selected == Some(chip_index) {
                        span.style = span.style.add_modifier(Modifier::REVERSED);
                    }
                    spans.push(span);
                }
            }
            let row_area = Rect::new(inner.x, y, content_width, 1);
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }

        let (input_x, input_row) = match chip_layout.rows.last() {
            Some(last_row) if !chip_layout.input_on_new_row => {
                let last_width: u16 = last_row.iter().map(|&i| boxes[i].width).sum();
                (inner.x + last_width, chip_layout.rows.len() as u16 - 1)
            }
            _ => (inner.x, chip_layout.rows.len() as u16),
        };
        let input_y = inner.y + input_row.saturating_mul(row_height);
        if input_y < inner.y + inner.height {
            let input_area = Rect::new(
                input_x,
                input_y,
                chip_layout.input_width.min(content_width),
                1,
            );
            self.input.render(frame, input_area, self.selected.is_none());
        }
    }

    /// Measure the chips. Widths are rebuilt on every call; they go stale
    /// whenever tag text changes.
    fn chip_boxes(&self) -> Vec<ChipBox> {
        self.tags.iter().map(|t| ChipBox::new(t.chip_width())).collect()
    }

    /// Add a tag from the current input text.
    fn insert_from_input(&mut self) -> Option<TagInputAction> {
        let record = TagRecord::new(self.input.value());
        self.input.clear();
        self.debounce_deadline = None;
        self.selected = None;
        self.settle_state();

        if !self.tags.add(record.clone()) {
            // Duplicate or empty text: expected interaction outcome.
            return None;
        }
        if let Some(hook) = self.hooks.on_tag_added.as_mut() {
            hook(&record);
        }
        Some(TagInputAction::Added(record))
    }

    /// Remove a tag by text and adjust the selection.
    fn remove_tag(&mut self, text: &str) -> Option<TagInputAction> {
        let removed = self.tags.remove_by_text(text)?;
        self.selected = match self.selected {
            Some(_) if self.tags.is_empty() => None,
            Some(i) => Some(i.min(self.tags.len() - 1)),
            None => None,
        };
        if let Some(hook) = self.hooks.on_tag_removed.as_mut() {
            hook(&removed);
        }
        Some(TagInputAction::Removed(removed))
    }

    /// Confirm the selected pending chip.
    fn confirm_selected(&mut self) -> Option<TagInputAction> {
        let index = self.selected?;
        let record = self.tags.get(index)?;
        if !record.pending() {
            return None;
        }
        let text = record.text().to_string();
        self.tags.confirm(&text);
        self.settle_state();
        Some(TagInputAction::Confirmed(text))
    }

    /// The search trigger: issue a search, or commit all pending tags when
    /// results are already displayed.
    fn search_trigger(&mut self) -> Option<TagInputAction> {
        if self.state == SearchState::PendingSearch {
            let committed = self.tags.confirm_all();
            self.state = SearchState::Idle;
            self.selected = None;
            return Some(TagInputAction::CommittedAll(committed));
        }

        let params = SearchParams::new(self.input.value());
        if params.is_empty() {
            return None;
        }
        self.debounce_deadline = None;
        self.state = SearchState::AwaitingDebounce;
        Some(TagInputAction::SearchRequested(params))
    }

    /// Re-arm the debounce deadline, replacing any armed one.
    fn arm_debounce(&mut self) {
        if !self.config.auto_search {
            return;
        }
        self.debounce_deadline =
            Some(Instant::now() + Duration::from_millis(self.config.debounce_ms));
        self.state = SearchState::AwaitingDebounce;
    }

    /// Fall back to the state implied by the collection contents.
    fn settle_state(&mut self) {
        self.state = if self.tags.iter().any(|t| t.pending()) {
            SearchState::PendingSearch
        } else {
            SearchState::Idle
        };
    }
}
