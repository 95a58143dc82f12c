//! List command - list stored templates.

use anyhow::Result;
use clap::Args;

use stencil_api::Config;
use stencil_core::EngineSession;

#[derive(Args)]
pub struct ListArgs {
    /// Also show each template's derived inputs
    #[arg(long)]
    inputs: bool,
}

pub async fn execute(args: ListArgs) -> Result<()> {
    let config = Config::from_env()?;
    let store = super::connect_store(&config).await?;
    let session = EngineSession::open(store).await?;

    let templates = session.list_templates().await?;
    if templates.is_empty() {
        println!("No templates stored.");
        return Ok(());
    }

    for template in &templates {
        println!("📄 {} ({})", template.name, template.id);
        if let Some(description) = &template.description {
            println!("   {}", description);
        }
        if args.inputs {
            if let Some(entry) = session.catalog().get(&template.name) {
                for (name, requirement) in entry.schema().iter() {
                    let marker = if requirement.is_required() {
                        "required"
                    } else {
                        "optional"
                    };
                    println!("   - {} ({}): {}", name, marker, requirement.description());
                }
            }
        }
    }
    println!("\n{} template(s)", templates.len());
    Ok(())
}
