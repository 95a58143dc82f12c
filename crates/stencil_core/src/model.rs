//! Template and input records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, reusable text template with `{variable}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Opaque identifier, assigned at creation, immutable.
    pub id: Uuid,
    /// Lookup key for callers. Unique among active templates.
    pub name: String,
    pub description: Option<String>,
    /// Template text containing zero or more `{identifier}` placeholders.
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The persisted record of one placeholder discovered in a template body.
///
/// The set of input rows for a template always mirrors the distinct
/// placeholders of its current body; stale rows are replaced wholesale when
/// the body changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateInput {
    pub id: Uuid,
    pub template_id: Uuid,
    /// Placeholder identifier, e.g. `firstName` for `{firstName}`.
    pub name: String,
    pub description: Option<String>,
    pub required: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a template.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub body: String,
}

/// Partial update payload. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
}

/// One input row to persist when replacing a template's input set.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSpec {
    pub name: String,
    pub description: Option<String>,
    pub required: bool,
}

impl InputSpec {
    /// Spec for a freshly extracted placeholder. Extraction always yields
    /// required inputs; nothing currently produces an optional one.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            required: true,
        }
    }
}
