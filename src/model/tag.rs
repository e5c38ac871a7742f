//! The tag value object.
//!
//! A [`TagRecord`] holds the canonical label text, an optional navigation
//! link, the pending flag for tags surfaced by a search, and the close
//! glyph rendered on the chip. Records are built from loosely-shaped seed
//! values (JSON objects, strings or numbers); anything else yields a record
//! with empty text that callers must treat as "no tag".

use ratatui::style::{Color, Style};
use ratatui::text::Span;
use serde_json::Value;

use crate::error::{AppError, Result};

/// Maximum number of characters of a tag shown on a chip.
pub const TEXT_MAX: usize = 10;

/// Recommended minimum tag length. Declared for hosts that want to enforce
/// it; the widget itself does not.
pub const TEXT_MIN: usize = 2;

/// Glyph shown on a confirmed tag's close button.
pub const REMOVE_GLYPH: &str = "✕";

/// Glyph shown on a pending tag awaiting confirmation.
pub const CONFIRM_GLYPH: &str = "✓";

/// Default navigation target for tags without a link.
const DEFAULT_LINK: &str = "#";

/// A single tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Canonical label text. Empty means "no tag".
    text: String,
    /// Navigation target.
    link: String,
    /// True while the tag awaits confirmation after a search.
    pending: bool,
    /// Close-button glyph rendered on the chip.
    glyph: String,
}

impl TagRecord {
    /// Create a confirmed tag from raw text.
    ///
    /// The text is sanitized and trimmed; the result may be empty.
    pub fn new(text: &str) -> Self {
        Self {
            text: sanitize(text),
            link: DEFAULT_LINK.to_string(),
            pending: false,
            glyph: REMOVE_GLYPH.to_string(),
        }
    }

    /// Build a record from a seed value.
    ///
    /// Recognized shapes:
    /// - a JSON string or number, which becomes the text after trimming;
    /// - a JSON object, from which only the keys `text`, `link`, `pending`
    ///   and `glyph` are copied, each only when present and non-empty.
    ///
    /// Any other shape yields a record with empty text. Unknown object keys
    /// are ignored.
    pub fn from_seed(seed: &Value) -> Self {
        let mut record = Self::new("");

        match seed {
            Value::String(s) => record.text = sanitize(s),
            Value::Number(n) => record.text = n.to_string(),
            Value::Object(map) => {
                if let Some(text) = map.get("text") {
                    match text {
                        Value::String(s) => record.text = sanitize(s),
                        Value::Number(n) => record.text = n.to_string(),
                        _ => {}
                    }
                }
                if let Some(Value::String(link)) = map.get("link") {
                    if !link.is_empty() {
                        record.link = link.clone();
                    }
                }
                if let Some(Value::Bool(pending)) = map.get("pending") {
                    record.pending = *pending;
                    if *pending {
                        record.glyph = CONFIRM_GLYPH.to_string();
                    }
                }
                if let Some(Value::String(glyph)) = map.get("glyph") {
                    if !glyph.is_empty() {
                        record.glyph = sanitize(glyph);
                    }
                }
            }
            _ => {}
        }

        record
    }

    /// The canonical label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The navigation target.
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Whether the tag awaits confirmation.
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// The close-button glyph.
    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Whether this record carries no tag at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Mark a search-pending tag as pending and switch its glyph.
    pub fn mark_pending(&mut self) {
        self.pending = true;
        self.glyph = CONFIRM_GLYPH.to_string();
    }

    /// Promote a pending tag into a permanent one and switch its glyph.
    pub fn confirm(&mut self) {
        self.pending = false;
        self.glyph = REMOVE_GLYPH.to_string();
    }

    /// The text as shown on the chip: trimmed, and truncated with an
    /// ellipsis suffix when longer than [`TEXT_MAX`] characters.
    pub fn display_text(&self) -> String {
        let text = self.text.trim();
        if text.chars().count() > TEXT_MAX {
            let head: String = text.chars().take(TEXT_MAX - 3).collect();
            format!("{}...", head)
        } else {
            text.to_string()
        }
    }

    /// Set the navigation link.
    ///
    /// Fails with a validation error when the URL is empty, or when
    /// `require_absolute` is set and the URL is not an absolute
    /// `ftp`/`http`/`https` URL. Returns `self` on success so calls can be
    /// chained.
    pub fn set_link(&mut self, url: &str, require_absolute: bool) -> Result<&mut Self> {
        if url.trim().is_empty() {
            return Err(AppError::validation("please include a valid url"));
        }
        if require_absolute && !is_absolute_url(url) {
            return Err(AppError::validation(format!(
                "please include an absolute url, got '{}'",
                url
            )));
        }
        self.link = url.to_string();
        Ok(self)
    }

    /// The chip content: display text plus the close glyph, padded.
    ///
    /// `None` when the record carries no tag.
    pub fn chip_label(&self) -> Option<String> {
        if self.text.is_empty() {
            return None;
        }
        Some(format!(" {} {} ", self.display_text(), self.glyph))
    }

    /// The rendered width of the chip in terminal columns, excluding the
    /// gap between chips.
    pub fn chip_width(&self) -> u16 {
        self.chip_label()
            .map(|label| label.chars().count() as u16)
            .unwrap_or(0)
    }

    /// Render the chip as a styled span.
    ///
    /// `None` when the record carries no tag. The link is intentionally not
    /// part of the chip content.
    pub fn render(&self) -> Option<Span<'static>> {
        let label = self.chip_label()?;
        let style = if self.pending {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::White).bg(Color::Blue)
        };
        Some(Span::styled(label, style))
    }
}

/// Strip control characters and surrounding whitespace.
///
/// Terminal escape sequences embedded in tag text would otherwise be
/// written straight into the backing buffer.
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Check whether a URL is absolute: an `ftp`/`http`/`https` scheme,
/// optional userinfo, a non-empty host, an optional numeric port and an
/// optional path.
fn is_absolute_url(url: &str) -> bool {
    let rest = match url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .or_else(|| url.strip_prefix("ftp://"))
    {
        Some(rest) => rest,
        None => return false,
    };

    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host_port = match authority.rsplit_once('@') {
        Some((userinfo, host_port)) if !userinfo.is_empty() => host_port,
        Some(_) => return false,
        None => authority,
    };
    let (host, port) = match host_port.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    };

    if host.is_empty() || host.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    if let Some(port) = port {
        if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_trims_text() {
        let tag = TagRecord::new("  rust  ");
        assert_eq!(tag.text(), "rust");
        assert_eq!(tag.link(), "#");
        assert!(!tag.pending());
        assert_eq!(tag.glyph(), REMOVE_GLYPH);
    }

    #[test]
    fn test_from_seed_string() {
        let tag = TagRecord::from_seed(&json!("  alpha "));
        assert_eq!(tag.text(), "alpha");
    }

    #[test]
    fn test_from_seed_number() {
        let tag = TagRecord::from_seed(&json!(42));
        assert_eq!(tag.text(), "42");
    }

    #[test]
    fn test_from_seed_object() {
        let tag = TagRecord::from_seed(&json!({
            "text": "alpha",
            "link": "https://example.com/alpha",
            "pending": true,
        }));
        assert_eq!(tag.text(), "alpha");
        assert_eq!(tag.link(), "https://example.com/alpha");
        assert!(tag.pending());
        assert_eq!(tag.glyph(), CONFIRM_GLYPH);
    }

    #[test]
    fn test_from_seed_object_ignores_unknown_and_empty_keys() {
        let tag = TagRecord::from_seed(&json!({
            "text": "alpha",
            "link": "",
            "color": "red",
        }));
        assert_eq!(tag.text(), "alpha");
        assert_eq!(tag.link(), "#");
    }

    #[test]
    fn test_from_seed_degenerate_shapes_yield_empty() {
        for seed in [json!(null), json!(true), json!(["nested"]), json!({})] {
            let tag = TagRecord::from_seed(&seed);
            assert!(tag.is_empty(), "seed {:?} should yield no tag", seed);
            assert!(tag.render().is_none());
        }
    }

    #[test]
    fn test_display_text_short_unchanged() {
        let tag = TagRecord::new("short");
        assert_eq!(tag.display_text(), "short");
    }

    #[test]
    fn test_display_text_truncates_to_max() {
        let tag = TagRecord::new("a-rather-long-label");
        let display = tag.display_text();
        assert_eq!(display.chars().count(), TEXT_MAX);
        assert!(display.ends_with("..."));
        assert_eq!(display, "a-rathe...");
    }

    #[test]
    fn test_display_text_exactly_max_unchanged() {
        let tag = TagRecord::new("0123456789");
        assert_eq!(tag.display_text(), "0123456789");
    }

    #[test]
    fn test_set_link_relative_ok_without_require_absolute() {
        let mut tag = TagRecord::new("alpha");
        tag.set_link("/tags/alpha", false).unwrap();
        assert_eq!(tag.link(), "/tags/alpha");
    }

    #[test]
    fn test_set_link_rejects_empty() {
        let mut tag = TagRecord::new("alpha");
        let err = tag.set_link("   ", false).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_set_link_rejects_non_absolute() {
        let mut tag = TagRecord::new("alpha");
        let err = tag.set_link("not a url", true).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // The failed call leaves the link untouched.
        assert_eq!(tag.link(), "#");
    }

    #[test]
    fn test_set_link_accepts_absolute() {
        let mut tag = TagRecord::new("alpha");
        tag.set_link("http://example.com", true).unwrap();
        assert_eq!(tag.link(), "http://example.com");
        // The link never leaks into the chip.
        let label = tag.chip_label().unwrap();
        assert!(!label.contains("example.com"));
    }

    #[test]
    fn test_set_link_is_fluent() {
        let mut tag = TagRecord::new("alpha");
        tag.set_link("https://example.com", true)
            .unwrap()
            .confirm();
        assert!(!tag.pending());
    }

    #[test]
    fn test_is_absolute_url_shapes() {
        assert!(is_absolute_url("http://example.com"));
        assert!(is_absolute_url("https://example.com/path/to?q=1"));
        assert!(is_absolute_url("ftp://files.example.com"));
        assert!(is_absolute_url("https://user:pw@example.com:8080/x"));
        assert!(!is_absolute_url("example.com"));
        assert!(!is_absolute_url("https://"));
        assert!(!is_absolute_url("https://host:port"));
        assert!(!is_absolute_url("mailto:user@example.com"));
    }

    #[test]
    fn test_mark_pending_and_confirm_swap_glyphs() {
        let mut tag = TagRecord::new("alpha");
        tag.mark_pending();
        assert!(tag.pending());
        assert_eq!(tag.glyph(), CONFIRM_GLYPH);

        tag.confirm();
        assert!(!tag.pending());
        assert_eq!(tag.glyph(), REMOVE_GLYPH);
    }

    #[test]
    fn test_adversarial_text_stays_inert() {
        let tag = TagRecord::new("<script>");
        let label = tag.chip_label().unwrap();
        assert!(label.contains("<script>"));

        let escape = TagRecord::new("\x1b[31mred\x1b[0m");
        assert_eq!(escape.text(), "[31mred[0m");
        assert!(!escape.chip_label().unwrap().contains('\x1b'));
    }

    #[test]
    fn test_chip_width_matches_label() {
        let tag = TagRecord::new("alpha");
        // " alpha ✕ " is nine columns.
        assert_eq!(tag.chip_width(), 9);
        assert!(TagRecord::new("").chip_width() == 0);
    }

    #[test]
    fn test_min_is_not_enforced() {
        // TEXT_MIN is advisory; a one-character tag is accepted.
        let tag = TagRecord::new("a");
        assert!(tag.text().chars().count() < TEXT_MIN);
        assert!(!tag.is_empty());
    }
}
