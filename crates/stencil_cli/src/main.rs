//! Stencil CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Template not found
//! - 5: Store error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};
use stencil_core::EngineError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const NOT_FOUND: u8 = 4;
    pub const STORE_ERROR: u8 = 5;
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("stencil=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args).await,
        Commands::List(args) => commands::list::execute(args).await,
        Commands::Render(args) => commands::render::execute(args).await,
        Commands::Extract(args) => commands::extract::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(engine) = e.downcast_ref::<EngineError>() {
        return match engine {
            EngineError::TemplateNotFound(_) | EngineError::NameNotFound(_) => {
                ExitCodes::NOT_FOUND
            }
            EngineError::Validation(_) | EngineError::NameTaken(_) => {
                ExitCodes::VALIDATION_FAILURE
            }
            EngineError::Store(_) => ExitCodes::STORE_ERROR,
        };
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("argument") || msg.contains("option") {
        ExitCodes::INVALID_ARGS
    } else if msg.contains("database") || msg.contains("environment variable") {
        ExitCodes::STORE_ERROR
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
