use anyhow::Context;
use clap::Parser;
use tracing::debug;

use tax_server::{ServerConfig, logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = ServerConfig::parse();

    logging::init_logging(&cli.log_level, cli.log_file.as_deref())?;

    let config = cli.validate().context("invalid configuration")?;
    debug!(addr = %config.addr, base_url = %config.openai.base_url, "configuration loaded");

    server::run(config).await
}
