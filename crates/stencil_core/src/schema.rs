//! Caller-facing argument schemas derived from input records.

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::model::TemplateInput;

/// Requirement level for one template input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputRequirement {
    Required { description: String },
    Optional { description: String },
}

impl InputRequirement {
    pub fn description(&self) -> &str {
        match self {
            InputRequirement::Required { description } => description,
            InputRequirement::Optional { description } => description,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, InputRequirement::Required { .. })
    }
}

/// Ordered mapping from input name to its requirement.
///
/// Order follows the input records the schema was built from, which in turn
/// follow first-occurrence order in the template body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArgumentSchema {
    arguments: Vec<(String, InputRequirement)>,
}

impl ArgumentSchema {
    /// Build a schema from a template's persisted input records.
    ///
    /// Fails on a record with an empty name; such a row can never have come
    /// from extraction and would register an unusable argument.
    pub fn from_inputs(inputs: &[TemplateInput]) -> EngineResult<Self> {
        let mut arguments = Vec::with_capacity(inputs.len());
        for input in inputs {
            if input.name.is_empty() {
                return Err(EngineError::Validation(
                    "input record has an empty name".to_string(),
                ));
            }
            let description = input
                .description
                .clone()
                .unwrap_or_else(|| default_description(&input.name));
            let requirement = if input.required {
                InputRequirement::Required { description }
            } else {
                InputRequirement::Optional { description }
            };
            arguments.push((input.name.clone(), requirement));
        }
        Ok(Self { arguments })
    }

    /// Build a schema straight from freshly extracted placeholder names.
    /// Extraction derives every placeholder as required.
    pub fn from_placeholders(names: &[String]) -> Self {
        let arguments = names
            .iter()
            .map(|name| {
                (
                    name.clone(),
                    InputRequirement::Required {
                        description: default_description(name),
                    },
                )
            })
            .collect();
        Self { arguments }
    }

    pub fn get(&self, name: &str) -> Option<&InputRequirement> {
        self.arguments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r)
    }

    /// All argument names, in schema order.
    pub fn names(&self) -> Vec<String> {
        self.arguments.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Names of required arguments, in schema order.
    pub fn required_names(&self) -> Vec<String> {
        self.arguments
            .iter()
            .filter(|(_, r)| r.is_required())
            .map(|(n, _)| n.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputRequirement)> {
        self.arguments.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

fn default_description(name: &str) -> String {
    format!("Input for {}", name)
}
