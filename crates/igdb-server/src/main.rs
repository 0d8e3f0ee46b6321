mod cli;
mod config;
mod http;
mod igdb;
mod serve;

use clap::Parser;
use cli::{Cli, Commands};
use config::AddonConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;
    let http_addr = cli.http_addr;
    let load = || -> anyhow::Result<AddonConfig> {
        Ok(AddonConfig::resolve(&config_path)?.with_http_addr(http_addr.as_deref()))
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run(load()?).await,
        Commands::Manifest => cli::lookup::manifest(&load()?),
        Commands::Catalog(args) => cli::lookup::catalog(args, &load()?).await,
        Commands::Meta(args) => cli::lookup::meta(args, &load()?).await,
        Commands::Config(cmd) => cli::config_cmd::run(cmd, &config_path, http_addr.as_deref()),
    }
}
