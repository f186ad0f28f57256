//! snake-mesh entry point

use anyhow::Result;
use clap::Parser;

use snake_cli::{Cli, execute};

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let cli = Cli::parse();
    let default_filter = if cli.verbose {
        "snake_cli=debug,snake_core=debug"
    } else {
        "snake_cli=info,snake_core=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    execute(cli)
}
