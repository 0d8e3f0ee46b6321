use crate::cli::ConfigCommands;
use crate::config::AddonConfig;
use anyhow::Result;
use std::path::Path;

/// `http_addr` is the global `--http-addr` flag, applied the same way `serve` applies it.
pub fn run(cmd: ConfigCommands, config_path: &Path, http_addr: Option<&str>) -> Result<()> {
    match cmd {
        ConfigCommands::Validate => validate(config_path, http_addr),
        ConfigCommands::Show => show(config_path, http_addr),
    }
}

fn validate(config_path: &Path, http_addr: Option<&str>) -> Result<()> {
    match AddonConfig::resolve(config_path).map(|c| c.with_http_addr(http_addr)) {
        Ok(config) => {
            let errors = config.validate();
            if errors.is_empty() {
                println!("✅ Configuration is valid ({}).", config_path.display());
            } else {
                println!("❌ Validation errors ({}):", config_path.display());
                for e in &errors {
                    println!("  - {}", e);
                }
                std::process::exit(1);
            }
        }
        Err(e) => {
            println!("❌ Failed to load {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn show(config_path: &Path, http_addr: Option<&str>) -> Result<()> {
    let config = AddonConfig::load_or_default(config_path)
        .with_http_addr(http_addr)
        .redacted();
    match toml::to_string_pretty(&config) {
        Ok(s) => println!("{}", s),
        Err(e) => anyhow::bail!("Failed to serialize config: {}", e),
    }
    Ok(())
}
