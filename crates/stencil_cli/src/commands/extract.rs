//! Extract command - show the placeholders a template body would derive.

use anyhow::Result;
use clap::Args;

use stencil_core::PlaceholderExtractor;

#[derive(Args)]
pub struct ExtractArgs {
    /// Template body to scan, e.g. "Hi {firstName}"
    body: String,
}

pub async fn execute(args: ExtractArgs) -> Result<()> {
    let extractor = PlaceholderExtractor::new();
    let names = extractor.extract(&args.body);
    if names.is_empty() {
        println!("No placeholders found.");
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}
