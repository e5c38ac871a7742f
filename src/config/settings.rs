//! Widget settings.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::types::CallMethod;

use super::ConfigError;

/// Tag input widget settings.
///
/// Widths and heights are terminal cells. The content area must fit inside
/// the wrapper, and the minimum input width must fit inside the content
/// area; `validate` enforces this when loading from a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Outer width of the widget, border included.
    pub wrapper_width: u16,
    /// Width available to chip rows and the input.
    pub content_width: u16,
    /// Smallest input width before the input wraps to its own row.
    pub min_input_width: u16,
    /// Height of one chip row.
    pub row_height: u16,
    /// Placeholder text shown in the empty input.
    pub placeholder: String,
    /// Remote search endpoint. Empty disables remote search.
    pub call_url: String,
    /// HTTP method for remote search calls.
    pub call_method: CallMethod,
    /// Cache search results in the session store.
    pub local_store: bool,
    /// Fire a search automatically while typing.
    pub auto_search: bool,
    /// Quiet window before an automatic search fires, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            wrapper_width: 60,
            content_width: 56,
            min_input_width: 12,
            row_height: 1,
            placeholder: String::new(),
            call_url: String::new(),
            call_method: CallMethod::Post,
            local_store: true,
            auto_search: false,
            debounce_ms: 800,
        }
    }
}

impl WidgetConfig {
    /// Check setting invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_width == 0 {
            return Err(ConfigError::ValidationError(
                "content width must be at least one column".to_string(),
            ));
        }
        if self.content_width > self.wrapper_width {
            return Err(ConfigError::ValidationError(format!(
                "content width {} exceeds wrapper width {}",
                self.content_width, self.wrapper_width
            )));
        }
        if self.min_input_width > self.content_width {
            return Err(ConfigError::ValidationError(format!(
                "minimum input width {} exceeds content width {}",
                self.min_input_width, self.content_width
            )));
        }
        if self.row_height == 0 {
            return Err(ConfigError::ValidationError(
                "row height must be at least one cell".to_string(),
            ));
        }
        if self.auto_search && self.call_url.is_empty() {
            warn!("auto_search is enabled but call_url is empty; searches will be skipped");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.wrapper_width, 60);
        assert_eq!(config.content_width, 56);
        assert_eq!(config.min_input_width, 12);
        assert_eq!(config.row_height, 1);
        assert_eq!(config.debounce_ms, 800);
        assert_eq!(config.call_method, CallMethod::Post);
        assert!(config.local_store);
        assert!(!config.auto_search);
    }
}
