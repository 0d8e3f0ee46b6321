use igdb_core::manifest::{DEFAULT_DESCRIPTION, DEFAULT_NAME};
use igdb_core::Manifest;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:7000";
pub const DEFAULT_IGDB_URL: &str = "https://api.igdb.com/v4";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid listen address {addr:?}: {reason}")]
    Addr { addr: String, reason: String },
}

/// Contents of `igdb-addon.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonConfig {
    pub server: ServerConfig,
    pub igdb: IgdbConfig,
    pub addon: AddonSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IgdbConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    pub access_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for IgdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_IGDB_URL.to_string(),
            client_id: None,
            access_token: None,
            timeout_secs: 30,
        }
    }
}

impl IgdbConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Display text of the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonSection {
    pub name: String,
    pub description: String,
}

impl Default for AddonSection {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl AddonConfig {
    /// Parse a config file. Environment overrides are not applied.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Config file if present and valid, defaults otherwise; environment
    /// overrides applied on top.
    pub fn load_or_default(path: &Path) -> Self {
        let config = if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        };
        config.with_env()
    }

    /// Like [`AddonConfig::load_or_default`], but a file that exists and fails
    /// to parse is an error.
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            Self::load(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };
        Ok(config.with_env())
    }

    /// Apply `IGDB_CLIENT_ID`, `IGDB_ACCESS_TOKEN` (or legacy `IGDB_KEY`) and
    /// `IGDB_ADDON_HTTP_ADDR` from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    pub fn with_env_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        if let Some(id) = non_empty("IGDB_CLIENT_ID") {
            self.igdb.client_id = Some(id);
        }
        if let Some(token) = non_empty("IGDB_ACCESS_TOKEN").or_else(|| non_empty("IGDB_KEY")) {
            self.igdb.access_token = Some(token);
        }
        if let Some(addr) = non_empty("IGDB_ADDON_HTTP_ADDR") {
            self.server.http_addr = addr;
        }
        self
    }

    /// Apply the `--http-addr` command-line flag, which beats file and environment.
    pub fn with_http_addr(mut self, addr: Option<&str>) -> Self {
        if let Some(addr) = addr {
            self.server.http_addr = addr.to_string();
        }
        self
    }

    pub fn http_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.http_addr.parse().map_err(|e: std::net::AddrParseError| ConfigError::Addr {
            addr: self.server.http_addr.clone(),
            reason: e.to_string(),
        })
    }

    pub fn manifest(&self) -> Manifest {
        Manifest::new(self.addon.name.clone(), self.addon.description.clone())
    }

    /// Human-readable problems that would stop the server from working.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(e) = self.http_addr() {
            errors.push(e.to_string());
        }
        if self.igdb.client_id.as_deref().map_or(true, str::is_empty) {
            errors.push("[igdb] client_id is not set (or set IGDB_CLIENT_ID)".to_string());
        }
        if self.igdb.access_token.as_deref().map_or(true, str::is_empty) {
            errors.push("[igdb] access_token is not set (or set IGDB_ACCESS_TOKEN)".to_string());
        }
        if !self.igdb.base_url.starts_with("http://") && !self.igdb.base_url.starts_with("https://") {
            errors.push(format!("[igdb] base_url {:?} is not an http(s) URL", self.igdb.base_url));
        }
        if self.igdb.timeout_secs == 0 {
            errors.push("[igdb] timeout_secs must be greater than 0".to_string());
        }
        if self.addon.name.trim().is_empty() {
            errors.push("[addon] name must not be empty".to_string());
        }

        errors
    }

    /// Copy safe to print: the access token is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if let Some(ref token) = copy.igdb.access_token {
            let shown: String = token.chars().take(4).collect();
            copy.igdb.access_token = Some(format!("{}…", shown));
        }
        copy
    }
}
