//! Serve command - run the HTTP API server.

use std::net::SocketAddr;

use anyhow::Result;
use clap::Args;
use tracing::info;

use stencil_api::{AppState, Config};

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind, overriding STENCIL_BIND_ADDR
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let store = super::connect_store(&config).await?;
    info!("Starting Stencil API");
    stencil_api::serve(AppState::new(store), config.bind_addr).await?;
    Ok(())
}
