//! Literal substitution of values into template bodies.

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

/// Outcome of a single substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every required value was present; the fully substituted text.
    Complete(String),
    /// Required names with no usable value, in schema order. No partial
    /// render is attempted.
    MissingRequired(Vec<String>),
}

/// Caller-facing reply to a render request.
///
/// Missing inputs are an informative outcome, not a failure: the reply
/// carries the unrendered body and the full set of known input names so the
/// caller can retry with a complete value map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderReply {
    Rendered {
        text: String,
    },
    MissingInputs {
        missing: Vec<String>,
        template: String,
        known_inputs: Vec<String>,
    },
}

/// Substitutes supplied values for `{placeholder}` spans.
#[derive(Clone)]
pub struct Renderer {
    pattern: Regex,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\{([^}]+)\}").unwrap(),
        }
    }

    /// Substitute `values` into `body`.
    ///
    /// Required names with no entry, or with an empty-string value, are
    /// reported as missing and nothing is substituted. Otherwise every
    /// placeholder with a supplied value is replaced in one pass over the
    /// body; substituted values are never rescanned, and placeholders with
    /// no value are left literally in place.
    pub fn render(
        &self,
        body: &str,
        values: &HashMap<String, String>,
        required: &[String],
    ) -> RenderOutcome {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| values.get(*name).map_or(true, |v| v.is_empty()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return RenderOutcome::MissingRequired(missing);
        }

        let rendered = self
            .pattern
            .replace_all(body, |caps: &regex::Captures| {
                let name = &caps[1];
                values
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| format!("{{{}}}", name))
            })
            .to_string();
        RenderOutcome::Complete(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_complete() {
        let renderer = Renderer::new();
        let outcome = renderer.render(
            "Hello {firstName} {lastName}!",
            &values(&[("firstName", "Ada"), ("lastName", "Lovelace")]),
            &["firstName".to_string(), "lastName".to_string()],
        );
        assert_eq!(
            outcome,
            RenderOutcome::Complete("Hello Ada Lovelace!".to_string())
        );
    }

    #[test]
    fn test_render_reports_missing_required() {
        let renderer = Renderer::new();
        let outcome = renderer.render(
            "Hello {firstName} {lastName}!",
            &values(&[("firstName", "John")]),
            &["firstName".to_string(), "lastName".to_string()],
        );
        assert_eq!(
            outcome,
            RenderOutcome::MissingRequired(vec!["lastName".to_string()])
        );
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let renderer = Renderer::new();
        let outcome = renderer.render(
            "{greeting}",
            &values(&[("greeting", "")]),
            &["greeting".to_string()],
        );
        assert_eq!(
            outcome,
            RenderOutcome::MissingRequired(vec!["greeting".to_string()])
        );
    }

    #[test]
    fn test_unsupplied_optional_left_in_place() {
        let renderer = Renderer::new();
        let outcome = renderer.render(
            "{greeting}, {name}",
            &values(&[("greeting", "Hi")]),
            &["greeting".to_string()],
        );
        assert_eq!(outcome, RenderOutcome::Complete("Hi, {name}".to_string()));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        // A value that itself looks like a placeholder must survive verbatim.
        let renderer = Renderer::new();
        let outcome = renderer.render(
            "{a} {b}",
            &values(&[("a", "{b}"), ("b", "two")]),
            &["a".to_string(), "b".to_string()],
        );
        assert_eq!(outcome, RenderOutcome::Complete("{b} two".to_string()));
    }

    #[test]
    fn test_value_is_literal_not_a_pattern() {
        let renderer = Renderer::new();
        let outcome = renderer.render(
            "{amount}",
            &values(&[("amount", "$100")]),
            &["amount".to_string()],
        );
        assert_eq!(outcome, RenderOutcome::Complete("$100".to_string()));
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let renderer = Renderer::new();
        let outcome = renderer.render(
            "{x} and {x} and {x}",
            &values(&[("x", "y")]),
            &["x".to_string()],
        );
        assert_eq!(outcome, RenderOutcome::Complete("y and y and y".to_string()));
    }
}
