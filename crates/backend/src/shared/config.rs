use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub forwarder: ForwarderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// External workflow that produces return judgments
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub workflow_url: String,
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Merchant automation URL forwarding
#[derive(Debug, Deserialize, Clone)]
pub struct ForwarderConfig {
    /// Used when a merchant has no URL of its own. BOLTIC_URL overrides it.
    #[serde(default)]
    pub default_url: Option<String>,
    #[serde(default = "default_forward_timeout")]
    pub timeout_secs: u64,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            default_url: None,
            timeout_secs: default_forward_timeout(),
        }
    }
}

impl ForwarderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_port() -> u16 {
    3000
}

fn default_upstream_timeout() -> u64 {
    50
}

fn default_forward_timeout() -> u64 {
    10
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[server]
port = 3000

[upstream]
workflow_url = "https://asia-south1.workflow.boltic.app/fc2e653e-295d-41a9-a2c7-d9b3dfbdb55f"
timeout_secs = 50

[forwarder]
timeout_secs = 10
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// BOLTIC_URL from the environment replaces `forwarder.default_url`.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    if let Ok(url) = std::env::var("BOLTIC_URL") {
        if !url.trim().is_empty() {
            tracing::info!("Using forwarding URL from BOLTIC_URL");
            config.forwarder.default_url = Some(url);
        }
    }
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    // If absolute path, use as is
    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    // If relative path, resolve it relative to the executable directory
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(db_path);
            return Ok(resolved_path);
        }
    }

    // Fallback: use relative to current directory
    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
pub fn test_config() -> Config {
    toml::from_str(DEFAULT_CONFIG).expect("embedded config must parse")
}
