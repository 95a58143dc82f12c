//! Render command - render a stored template by name.

use std::collections::HashMap;

use anyhow::{bail, Result};
use clap::Args;

use stencil_api::Config;
use stencil_core::{EngineSession, RenderReply};

#[derive(Args)]
pub struct RenderArgs {
    /// Name of the template to render
    name: String,

    /// Variable value as name=value; repeat for multiple variables
    #[arg(short = 'v', long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,
}

pub async fn execute(args: RenderArgs) -> Result<()> {
    let mut values = HashMap::new();
    for pair in &args.vars {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("invalid --var argument '{}', expected NAME=VALUE", pair);
        };
        values.insert(name.to_string(), value.to_string());
    }

    let config = Config::from_env()?;
    let store = super::connect_store(&config).await?;
    let session = EngineSession::open(store).await?;

    match session.render_by_name(&args.name, &values)? {
        RenderReply::Rendered { text } => println!("{}", text),
        RenderReply::MissingInputs {
            missing,
            template,
            known_inputs,
        } => {
            println!("⚠️  Missing required inputs: {}", missing.join(", "));
            println!("   Known inputs: {}", known_inputs.join(", "));
            println!("   Template: {}", template);
        }
    }
    Ok(())
}
