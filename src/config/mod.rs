use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Number of columns in the gallery grid.
    #[serde(default = "default_columns")]
    pub columns: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
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

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    #[serde(default = "default_max_upload")]
    pub max_upload_size: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_upload_size: default_max_upload(),
        }
    }
}

impl MediaConfig {
    pub fn max_upload_bytes(&self) -> Result<usize> {
        parse_size(&self.max_upload_size)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Argon2 PHC string produced by `gallery hash-secret`.
    #[serde(default)]
    pub secret_hash: Option<String>,
    #[serde(default = "default_session_lifetime")]
    pub session_lifetime: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_hash: None,
            session_lifetime: default_session_lifetime(),
        }
    }
}

impl AuthConfig {
    pub fn session_days(&self) -> Result<i64> {
        parse_days(&self.session_lifetime)
    }
}

pub const MAX_SESSION_DAYS: i64 = 365;

fn default_columns() -> u8 {
    3
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_pool_size() -> u32 {
    10
}

fn default_max_upload() -> String {
    "10MB".to_string()
}

fn default_session_lifetime() -> String {
    "7d".to_string()
}

/// Parses sizes such as `512KB`, `10MB` or a plain byte count.
pub fn parse_size(value: &str) -> Result<usize> {
    let value = value.trim().to_ascii_uppercase();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);
    let number: usize = digits
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size '{}'", value))?;
    let multiplier = match unit.trim() {
        "" | "B" => 1,
        "KB" | "K" => 1024,
        "MB" | "M" => 1024 * 1024,
        "GB" | "G" => 1024 * 1024 * 1024,
        other => anyhow::bail!("Unknown size unit '{}' in '{}'", other, value),
    };
    number
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Size '{}' is too large", value))
}

/// Parses lifetimes such as `7d` or `2w` into whole days.
pub fn parse_days(value: &str) -> Result<i64> {
    let value = value.trim().to_ascii_lowercase();
    let (digits, factor) = if let Some(d) = value.strip_suffix('w') {
        (d, 7)
    } else if let Some(d) = value.strip_suffix('d') {
        (d, 1)
    } else {
        (value.as_str(), 1)
    };
    let days: i64 = digits
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid lifetime '{}'", value))?;
    days.checked_mul(factor)
        .ok_or_else(|| anyhow::anyhow!("Lifetime '{}' is too large", value))
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!(
                "Could not read config file '{}': {}. Run 'gallery init' to create one.",
                path.display(),
                e
            )
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.site.columns == 0 || self.site.columns > 6 {
            anyhow::bail!("site.columns must be between 1 and 6");
        }
        if self.database.pool_size == 0 {
            anyhow::bail!("database.pool_size must be greater than 0");
        }
        if self.media.max_upload_bytes()? == 0 {
            anyhow::bail!("media.max_upload_size must be greater than 0");
        }
        let session_days = self.auth.session_days()?;
        if session_days <= 0 || session_days > MAX_SESSION_DAYS {
            anyhow::bail!(
                "auth.session_lifetime must be between 1 and {} days",
                MAX_SESSION_DAYS
            );
        }
        Ok(())
    }
}
