use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use std::path::Path;

/// Application configuration loaded from `config.toml`.
///
/// Keys that are not recognised are ignored, so one file can be shared with
/// other tooling.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")] 
    pub max_connections: u32,
    #[serde(default = "default_min_connections")] 
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")] 
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")] 
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")] 
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")] 
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./app.db?mode=rwc";

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Cross-origin settings. `allow_origins` is a comma-separated host list;
/// an empty list means any origin is accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allow_origins")]
    pub allow_origins: String,
}

fn default_allow_origins() -> String { "http://127.0.0.1:5173,http://localhost:5173".into() }

impl Default for CorsConfig {
    fn default() -> Self { Self { allow_origins: default_allow_origins() } }
}

impl CorsConfig {
    /// Split the configured list, dropping blanks.
    pub fn origins(&self) -> Vec<String> {
        self.allow_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Where uploaded files live and how they are exposed.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory served under `/static`.
    #[serde(default = "default_static_root")]
    pub static_root: String,
    /// Upload area; must sit below `static_root` for the public URLs to resolve.
    #[serde(default = "default_upload_root")]
    pub upload_root: String,
    /// URL prefix that maps onto `upload_root`.
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
}

fn default_static_root() -> String { "static".into() }
fn default_upload_root() -> String { "static/uploads".into() }
fn default_public_prefix() -> String { "/static/uploads".into() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            static_root: default_static_root(),
            upload_root: default_upload_root(),
            public_prefix: default_public_prefix(),
        }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` if present, otherwise start from defaults; then apply
    /// environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.cors.normalize_from_env();
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                self.url = url;
            }
        }
        if self.url.trim().is_empty() {
            self.url = DEFAULT_DATABASE_URL.to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl CorsConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(origins) = std::env::var("CORS_ALLOW_ORIGINS") {
            self.allow_origins = origins;
        }
    }
}

impl StorageConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(root) = std::env::var("UPLOAD_ROOT") {
            if !root.trim().is_empty() {
                self.upload_root = root;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.upload_root.trim().is_empty() {
            return Err(anyhow!("storage.upload_root is empty"));
        }
        if !self.public_prefix.starts_with('/') {
            return Err(anyhow!("storage.public_prefix must start with '/'"));
        }
        // Static files are served under `/static`, so uploads are only
        // reachable when they live inside `static_root`.
        let rel = Path::new(&self.upload_root)
            .strip_prefix(&self.static_root)
            .map_err(|_| anyhow!("storage.upload_root must be inside storage.static_root"))?;
        let segments: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let expected = if segments.is_empty() {
            "/static".to_string()
        } else {
            format!("/static/{}", segments.join("/"))
        };
        if self.public_prefix.trim_end_matches('/') != expected {
            return Err(anyhow!(
                "storage.public_prefix must be {expected} to match storage.upload_root"
            ));
        }
        Ok(())
    }
}
