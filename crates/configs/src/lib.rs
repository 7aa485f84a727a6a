use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_TABLE_NAME: &str = "checkUpdateBlog-employee-records";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Bind settings for the local HTTP harness.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8081, worker_threads: Some(4) }
    }
}

/// Record table location and client overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_table_name")]
    pub table_name: String,
    /// Overrides the SDK's region resolution when set.
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint override, e.g. DynamoDB Local.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Per-operation timeout handed to the SDK.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { table_name: default_table_name(), region: None, endpoint: None, timeout_ms: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: default_max_attempts(), backoff_base_ms: default_backoff_base_ms() }
    }
}

impl RetryConfig {
    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }
}

fn default_table_name() -> String { DEFAULT_TABLE_NAME.to_string() }
fn default_max_attempts() -> u32 { 3 }
fn default_backoff_base_ms() -> u64 { 100 }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from `CONFIG_PATH` (or `config.toml`), falling back to defaults when
    /// no file is present, then apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Apply overrides from a variable lookup. Taking the lookup as a closure
    /// keeps tests away from process-global state.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(table) = lookup("TABLE_NAME") {
            self.store.table_name = table;
        }
        if let Some(region) = lookup("AWS_REGION") {
            self.store.region = Some(region);
        }
        if let Some(endpoint) = lookup("DYNAMODB_ENDPOINT") {
            self.store.endpoint = Some(endpoint);
        }
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.store.normalize()?;
        self.retry.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StoreConfig {
    fn normalize(&mut self) -> Result<()> {
        self.table_name = self.table_name.trim().to_string();
        if self.table_name.is_empty() {
            return Err(anyhow!("store.table_name is empty; set it in config.toml or TABLE_NAME"));
        }
        // blank overrides behave as unset
        if self.region.as_deref().is_some_and(|r| r.trim().is_empty()) {
            self.region = None;
        }
        if self.endpoint.as_deref().is_some_and(|e| e.trim().is_empty()) {
            self.endpoint = None;
        }
        Ok(())
    }
}

impl RetryConfig {
    fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(anyhow!("retry.max_attempts must be >= 1"));
        }
        Ok(())
    }
}
