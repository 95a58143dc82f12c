//! # stencil_store
//!
//! Store adapters implementing [`stencil_core::TemplateStore`]:
//!
//! - [`PgTemplateStore`]: PostgreSQL via sqlx, the production store.
//!   Migrations live under `migrations/`.
//! - [`MemoryTemplateStore`]: in-process store for tests and local
//!   development.

pub mod memory;
pub mod postgres;

pub use memory::MemoryTemplateStore;
pub use postgres::PgTemplateStore;
