//! Placeholder discovery.

use std::collections::HashSet;

use regex::Regex;

/// Scans template bodies for `{identifier}` placeholders.
pub struct PlaceholderExtractor {
    pattern: Regex,
}

impl Default for PlaceholderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self {
            // Leftmost match, shortest non-`}` body. Any byte sequence that
            // is not a `}` is accepted as an identifier.
            pattern: Regex::new(r"\{([^}]+)\}").unwrap(),
        }
    }

    /// Return the distinct placeholder names in `body`, in first-occurrence
    /// order. Unmatched braces are ignored.
    pub fn extract(&self, body: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for caps in self.pattern.captures_iter(body) {
            let name = &caps[1];
            if seen.insert(name.to_string()) {
                names.push(name.to_string());
            }
        }
        names
    }
}
