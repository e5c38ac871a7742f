//! Search request types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// HTTP method used for remote search calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallMethod {
    /// Send the parameters as a query string.
    Get,
    /// Send the parameters as a form body.
    #[default]
    Post,
}

/// Parameters for one search call: the term plus extra key/value pairs.
///
/// The term is always transmitted as the `q` parameter; extra parameters
/// never override it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    term: String,
    params: BTreeMap<String, String>,
}

impl SearchParams {
    /// Create parameters for the given search term. The term is trimmed.
    pub fn new(term: &str) -> Self {
        Self {
            term: term.trim().to_string(),
            params: BTreeMap::new(),
        }
    }

    /// The trimmed search term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether the term is empty. Empty terms never produce a search.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    /// Add or replace an extra parameter.
    pub fn add_param(&mut self, name: &str, value: &str) -> &mut Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// Remove an extra parameter.
    pub fn remove_param(&mut self, name: &str) -> &mut Self {
        self.params.remove(name);
        self
    }

    /// The key/value pairs to transmit, term first.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = vec![("q", self.term.as_str())];
        pairs.extend(
            self.params
                .iter()
                .filter(|(name, _)| name.as_str() != "q")
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_term() {
        let params = SearchParams::new("  rust ");
        assert_eq!(params.term(), "rust");
        assert!(!params.is_empty());
    }

    #[test]
    fn test_empty_term() {
        assert!(SearchParams::new("   ").is_empty());
    }

    #[test]
    fn test_pairs_include_term_first() {
        let mut params = SearchParams::new("rust");
        params.add_param("limit", "20");
        assert_eq!(params.pairs(), vec![("q", "rust"), ("limit", "20")]);
    }

    #[test]
    fn test_add_and_remove_param() {
        let mut params = SearchParams::new("rust");
        params.add_param("limit", "20").add_param("limit", "50");
        assert_eq!(params.pairs(), vec![("q", "rust"), ("limit", "50")]);

        params.remove_param("limit");
        assert_eq!(params.pairs(), vec![("q", "rust")]);
    }

    #[test]
    fn test_extra_param_cannot_override_term() {
        let mut params = SearchParams::new("rust");
        params.add_param("q", "other");
        assert_eq!(params.pairs(), vec![("q", "rust")]);
    }

    #[test]
    fn test_call_method_serde() {
        let method: CallMethod = serde_json::from_str("\"get\"").unwrap();
        assert_eq!(method, CallMethod::Get);
        assert_eq!(serde_json::to_string(&CallMethod::Post).unwrap(), "\"post\"");
    }
}
