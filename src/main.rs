use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qamill::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qamill=info")),
        )
        .init();

    Cli::parse().run()
}
