//! CLI command definitions.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

use stencil_api::Config;
use stencil_core::TemplateStore;
use stencil_store::PgTemplateStore;

pub mod extract;
pub mod list;
pub mod render;
pub mod serve;

/// Stencil - reusable text templates with {variable} placeholders
#[derive(Parser)]
#[command(name = "stencil")]
#[command(version, about = "Stencil - template registry and rendering service")]
#[command(long_about = r#"
Stencil manages named, reusable text templates with {variable} placeholders
and renders them against concrete values.

COMMANDS:
  serve    → Run the HTTP API server
  list     → List stored templates and their inputs
  render   → Render a stored template by name
  extract  → Show the placeholders a template body would derive

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Template not found
  5 - Store error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),

    /// List stored templates
    List(list::ListArgs),

    /// Render a stored template by name
    Render(render::RenderArgs),

    /// Show the placeholders a template body would derive
    Extract(extract::ExtractArgs),
}

/// Connect to the configured database and return the production store.
pub(crate) async fn connect_store(config: &Config) -> Result<Arc<dyn TemplateStore>> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("connecting to database")?;
    let store = PgTemplateStore::new(pool);
    store.migrate().await.context("running migrations")?;
    Ok(Arc::new(store))
}
