use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;

use backend_domain::{DbConfig, QrRenderConfig, RuntimeConfig};

use super::validation::parse_hex_color;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub scanner_token: Option<String>,
    pub public_base_url: String,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub holders_path: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub log_dir: Option<String>,
    pub qr_module_size: u32,
    pub qr_dark_color: String,
    pub qr_light_color: String,
    /// File the settings were read from; `None` when defaults were used.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            scanner_token: None,
            public_base_url: "http://127.0.0.1:3240".to_string(),
            database_url: None,
            database_max_connections: 5,
            holders_path: "./holders.yaml".to_string(),
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 10,
            log_dir: None,
            qr_module_size: 10,
            qr_dark_color: "#710014".to_string(),
            qr_light_color: "#ffffff".to_string(),
            source: None,
        }
    }
}

impl AppConfig {
    /// Reads `$PULSE_CONFIG` (default `./config.toml`). Nothing is logged
    /// here since the subscriber depends on the result; callers report
    /// `source` once logging is up.
    pub async fn load() -> Result<Self> {
        let path = env::var("PULSE_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(Path::new(&path)).await
    }

    pub async fn load_from(file_path: &Path) -> Result<Self> {
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            let mut config = Self::parse(&content)?;
            config.source = Some(file_path.to_path_buf());
            config
        } else {
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        self.api_token = normalize_optional(self.api_token.take());
        self.scanner_token = normalize_optional(self.scanner_token.take());
        self.database_url = normalize_optional(self.database_url.take());
        self.log_dir = normalize_optional(self.log_dir.take());
        self.public_base_url = self.public_base_url.trim().trim_end_matches('/').to_string();
        if self.database_max_connections == 0 {
            self.database_max_connections = 1;
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.holders_path = resolve_path(base, &self.holders_path);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.public_base_url.trim().is_empty() {
            return Err(anyhow!("public_base_url must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if !(1..=64).contains(&self.qr_module_size) {
            return Err(anyhow!("qr_module_size must be between 1 and 64"));
        }
        parse_hex_color(&self.qr_dark_color)
            .map_err(|err| anyhow!("invalid qr_dark_color: {}", err))?;
        parse_hex_color(&self.qr_light_color)
            .map_err(|err| anyhow!("invalid qr_light_color: {}", err))?;
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            scanner_token: self.scanner_token.clone(),
            public_base_url: self.public_base_url.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            database_url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            holders_path: self.holders_path.clone(),
        }
    }

    pub fn to_qr_config(&self) -> Result<QrRenderConfig> {
        Ok(QrRenderConfig {
            module_size: self.qr_module_size,
            dark_color: parse_hex_color(&self.qr_dark_color)?,
            light_color: parse_hex_color(&self.qr_light_color)?,
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("PULSE_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("PULSE_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("PULSE_SCANNER_TOKEN") {
            self.scanner_token = Some(value);
        }
        if let Ok(value) = env::var("PULSE_PUBLIC_BASE_URL") {
            self.public_base_url = value;
        }
        if let Ok(value) = env::var("PULSE_DATABASE_URL") {
            self.database_url = Some(value);
        }
        if let Ok(value) = env::var("PULSE_DATABASE_MAX_CONNECTIONS") {
            self.database_max_connections = value.parse().unwrap_or(self.database_max_connections);
        }
        if let Ok(value) = env::var("PULSE_HOLDERS_PATH") {
            self.holders_path = value;
        }
        if let Ok(value) = env::var("PULSE_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("PULSE_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("PULSE_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Ok(value) = env::var("PULSE_QR_MODULE_SIZE") {
            self.qr_module_size = value.parse().unwrap_or(self.qr_module_size);
        }
        if let Ok(value) = env::var("PULSE_QR_DARK_COLOR") {
            self.qr_dark_color = value;
        }
        if let Ok(value) = env::var("PULSE_QR_LIGHT_COLOR") {
            self.qr_light_color = value;
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
