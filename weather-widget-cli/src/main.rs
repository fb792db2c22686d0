//! Binary crate for the `weather-widget` terminal tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and the widget prompt loop
//! - Rendering controller state to the terminal

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
