//! emuctl - main entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use emuctl::cli::{Cli, Command, run_key_command, run_status_command, run_type_command};
use emuctl::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("emuctl=info")),
        )
        .init();

    let mut config = Config::from_env()?;
    if let Some(addr) = cli.addr {
        config.grpc.addr = Some(addr);
    }

    match cli.command {
        Command::Type(args) => run_type_command(&config, &args).await,
        Command::Key(args) => run_key_command(&config, &args).await,
        Command::Status(args) => run_status_command(&config, &args).await,
    }
}
