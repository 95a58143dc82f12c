//! # stencil_core
//!
//! Template registry and rendering engine for Stencil.
//!
//! Templates are named strings with `{variable}` placeholders. This crate
//! discovers placeholders, derives per-template input schemas, keeps a
//! request-scoped catalog of offered templates in step with store mutations,
//! and renders templates against supplied values.
//!
//! # Architecture
//!
//! - **Extractor**: pure scan of a body for distinct placeholder names
//! - **Schema**: projects input records into a caller-facing argument schema
//! - **Renderer**: single-pass literal substitution with missing-input reporting
//! - **Catalog**: name-keyed registry of schemas and render closures
//! - **Engine**: request-scoped session tying the store, extractor, and
//!   catalog together behind the save/update/delete/list/render operations
//!
//! # Example
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use stencil_core::{EngineSession, NewTemplate};
//!
//! let mut session = EngineSession::open(store).await?;
//! session
//!     .save_template(NewTemplate {
//!         name: "greeting".into(),
//!         description: None,
//!         body: "Hi {n}".into(),
//!     })
//!     .await?;
//!
//! let values = HashMap::from([("n".to_string(), "Ada".to_string())]);
//! let reply = session.render_by_name("greeting", &values)?;
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod schema;
pub mod store;

// Re-export main types for convenience
pub use catalog::{bootstrap, Catalog, CatalogEntry, RenderFn};
pub use engine::{EngineSession, SavedTemplate};
pub use error::{EngineError, EngineResult};
pub use extract::PlaceholderExtractor;
pub use model::{InputSpec, NewTemplate, Template, TemplateInput, TemplateUpdate};
pub use render::{RenderOutcome, RenderReply, Renderer};
pub use schema::{ArgumentSchema, InputRequirement};
pub use store::{StoreError, StoreResult, TemplateStore};
