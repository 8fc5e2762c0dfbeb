use crate::application::location_log::DEFAULT_STORAGE_KEY;
use crate::application::storage_port::KeyValueStorage;
use crate::domain::zone::ZonePolicy;
use crate::infrastructure::file_storage::FileStorage;
use crate::infrastructure::memory_storage::MemoryStorage;
use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Build-mode flag; the only environment variable the crate reads
pub const MODE_ENV_VAR: &str = "WANDER_MODE";

pub const DEFAULT_CONFIG_PATH: &str = "config/history";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl Mode {
    pub fn is_development(self) -> bool {
        self == Mode::Development
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub storage: StorageSettings,
    /// `local`, `utc` or a fixed offset like `+02:00`
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_range_days")]
    pub default_range_days: i64,
    #[serde(default)]
    pub mock: MockSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_storage_key")]
    pub key: String,
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
    /// Only honoured by the memory backend
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MockSettings {
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,
    #[serde(default = "default_mock_days")]
    pub days: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            key: default_storage_key(),
            dir: default_storage_dir(),
            quota_bytes: None,
        }
    }
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            days: default_mock_days(),
            seed: None,
        }
    }
}

fn default_timezone() -> String {
    "local".to_string()
}

fn default_range_days() -> i64 {
    7
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".wander")
}

fn default_center_latitude() -> f64 {
    40.7128
}

fn default_center_longitude() -> f64 {
    -74.0060
}

fn default_mock_days() -> u32 {
    30
}

impl HistoryConfig {
    pub fn zone(&self) -> anyhow::Result<ZonePolicy> {
        self.timezone
            .parse()
            .with_context(|| format!("Invalid timezone setting '{}'", self.timezone))
    }
}

impl StorageSettings {
    pub fn open(&self) -> Arc<dyn KeyValueStorage> {
        match (self.backend, self.quota_bytes) {
            (StorageBackend::File, _) => Arc::new(FileStorage::new(self.dir.clone())),
            (StorageBackend::Memory, Some(quota)) => Arc::new(MemoryStorage::with_quota(quota)),
            (StorageBackend::Memory, None) => Arc::new(MemoryStorage::new()),
        }
    }
}

pub fn load_history_config() -> anyhow::Result<HistoryConfig> {
    load_history_config_from(DEFAULT_CONFIG_PATH, std::env::var(MODE_ENV_VAR).ok())
}

/// Load settings from an optional file at `path` (extension resolved by the
/// config crate), with `mode_override` taking precedence over the file
pub fn load_history_config_from(
    path: &str,
    mode_override: Option<String>,
) -> anyhow::Result<HistoryConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .set_override_option("mode", mode_override.map(|m| m.trim().to_lowercase()))?
        .build()
        .with_context(|| format!("Failed to read configuration from {}", path))?;

    let config: HistoryConfig = settings
        .try_deserialize()
        .context("Failed to parse history configuration")?;

    if config.default_range_days <= 0 {
        anyhow::bail!(
            "default_range_days must be positive, got {}",
            config.default_range_days
        );
    }

    Ok(config)
}
