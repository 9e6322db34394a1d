//! Entry point wiring CLI dispatch to the sample and network modules.

mod cli;

use anyhow::Result;
use attitude_cnn::{logging, ModelConfig};
use cli::Cli;
use tracing::{info, instrument};

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    logging::init_tracing()?;
    let config = ModelConfig::from_env();
    let cli = Cli::parse();

    info!(?cli, "starting command");
    cli.dispatch(config).await
}
