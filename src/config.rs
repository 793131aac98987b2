use serde::Deserialize;
use std::path::Path;

// ──────────────────────────── TOML structure ────────────────────────────

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:7272".to_string()
}
fn default_request_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
        }
    }
}

fn default_pool_size() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
        }
    }
}

fn default_environment() -> String {
    "development".to_string()
}

// ──────────────────────────── Resolved Settings ────────────────────────────

/// Flat settings resolved from TOML + environment variables. Fixed at
/// process start and passed by value into the application state; there is
/// no process-wide mutable configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub environment: String,

    /// Base URL of the upstream RAG backend.
    pub rag_base_url: String,
    pub upstream_timeout_secs: u64,

    /// Account store connection.
    pub postgres_uri: String,
    pub db_pool_size: u32,
}

/// Load settings from a TOML file (missing file means defaults) with
/// environment overrides. `POSTGRES_URI` is environment-only;
/// `RAG_BASE_URL` overrides the configured upstream base URL.
pub fn load_settings_from_path(path: impl AsRef<Path>) -> anyhow::Result<Settings> {
    // Load .env if present (ignore errors)
    let _ = dotenvy::dotenv();

    let config: TomlConfig = match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => toml::from_str(&content)?,
        Err(_) => TomlConfig::default(),
    };

    let rag_base_url =
        std::env::var("RAG_BASE_URL").unwrap_or_else(|_| config.upstream.base_url.clone());

    let postgres_uri = std::env::var("POSTGRES_URI")
        .map_err(|_| anyhow::anyhow!("POSTGRES_URI environment variable is required"))?;

    Ok(Settings {
        host: config.server.host,
        port: config.server.port,
        environment: config.service.environment,
        rag_base_url,
        upstream_timeout_secs: config.upstream.request_timeout_secs,
        postgres_uri,
        db_pool_size: config.database.pool_size,
    })
}
