pub mod config_cmd;
pub mod lookup;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "igdb-addon")]
#[command(version, about = "Game trailers and metadata from IGDB as a media-center addon")]
pub struct Cli {
    /// Path to igdb-addon.toml
    #[arg(
        long,
        global = true,
        env = "IGDB_ADDON_CONFIG",
        default_value = "igdb-addon.toml"
    )]
    pub config: PathBuf,

    /// HTTP listen address (overrides config file and IGDB_ADDON_HTTP_ADDR)
    #[arg(long, global = true)]
    pub http_addr: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP addon server (default)
    Serve,
    /// Print the addon manifest
    Manifest,
    /// Query the catalog once and print the results
    Catalog(CatalogArgs),
    /// Look up one item and print its metadata
    Meta(MetaArgs),
    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Free-text search; lists recent popular releases when omitted
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, default_value = "table")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct MetaArgs {
    /// Item id, e.g. igdb-1942
    pub id: String,
    #[arg(long, default_value = "table")]
    pub format: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    Validate,
    Show,
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["igdb-addon"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("igdb-addon.toml"));
    }

    #[test]
    fn test_parse_catalog_search() {
        let cli = Cli::try_parse_from(["igdb-addon", "catalog", "--search", "zelda", "--format", "json"]).unwrap();
        match cli.command {
            Some(Commands::Catalog(args)) => {
                assert_eq!(args.search.as_deref(), Some("zelda"));
                assert_eq!(args.format, "json");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("The Legend of Zelda", 10), "The Legen…");
    }
}
