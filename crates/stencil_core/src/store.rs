//! The narrow persistence contract the engine needs.
//!
//! Implementations live outside this crate. The engine never retries a
//! failed store operation; errors are surfaced verbatim to the caller.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{InputSpec, NewTemplate, Template, TemplateInput, TemplateUpdate};

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in a store implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Durable storage for templates and their derived inputs.
///
/// Deleting a template must cascade to its inputs; no orphan input records
/// may survive. Lookup by name resolves against the unique active name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Persist a new template, assigning its id and timestamps.
    async fn create_template(&self, new: NewTemplate) -> StoreResult<Template>;

    async fn get_template(&self, id: Uuid) -> StoreResult<Option<Template>>;

    async fn get_template_by_name(&self, name: &str) -> StoreResult<Option<Template>>;

    async fn list_templates(&self) -> StoreResult<Vec<Template>>;

    /// Apply a partial update, refreshing `updated_at`. Fails with
    /// [`StoreError::NotFound`] if the id does not exist.
    async fn update_template(&self, id: Uuid, update: TemplateUpdate) -> StoreResult<Template>;

    /// Delete a template and, by cascade, its inputs. Fails with
    /// [`StoreError::NotFound`] if the id does not exist.
    async fn delete_template(&self, id: Uuid) -> StoreResult<()>;

    /// Replace the full input set of a template: remove all existing input
    /// records, then insert `inputs` in order.
    async fn replace_inputs(&self, template_id: Uuid, inputs: Vec<InputSpec>) -> StoreResult<()>;

    /// List a template's input records in insertion order.
    async fn list_inputs(&self, template_id: Uuid) -> StoreResult<Vec<TemplateInput>>;
}
