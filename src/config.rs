use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_URL: &str = "http://localhost:7879";
pub const DEFAULT_MAX_AGE_DAYS: i64 = 14;
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub radarr: RadarrConfig,
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

#[derive(Debug, Deserialize)]
pub struct RadarrConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
}

impl Default for RadarrConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CleanupConfig {
    /// Movies imported at least this many days ago are unmonitored and their file deleted.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_max_age_days() -> i64 {
    DEFAULT_MAX_AGE_DAYS
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.radarr.api_key.trim().is_empty() {
            bail!(
                "No Radarr API key configured. Set [radarr] api_key in {}",
                config_path().display()
            );
        }
        let url = self.radarr.url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("Radarr url must start with http:// or https://, got {url:?}");
        }
        if self.cleanup.page_size == 0 {
            bail!("cleanup.page_size must be greater than zero");
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("RADARR_CLEANUP_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("radarr-cleanup")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?
    } else {
        AppConfig::default()
    };
    config.radarr.url = config.radarr.url.trim_end_matches('/').to_string();
    config.validate()?;
    Ok(config)
}
