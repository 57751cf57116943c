use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
const CURRENT_VERSION: u32 = 1;

pub const CONFIG_ENV: &str = "HEARTRISK_CONFIG";
pub const MODEL_PATH_ENV: &str = "HEARTRISK_MODEL_PATH";
pub const BIND_ADDR_ENV: &str = "HEARTRISK_BIND_ADDR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Serialized classifier, relative to the working directory unless absolute.
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("heart_disease_rf_model.json")
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            model_path: default_model_path(),
            bind_addr: default_bind_addr(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

        let json: serde_json::Value = serde_json::from_str(&contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;
        if on_disk_version > CURRENT_VERSION {
            return Err(eyre::eyre!(
                "config_version {on_disk_version} is newer than this build supports ({CURRENT_VERSION})"
            ));
        }

        let mut config: ServerConfig = serde_json::from_value(json)?;
        config.config_version = CURRENT_VERSION;
        Ok(config)
    }

    /// Environment variables win over the file.
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> eyre::Result<Self> {
        if let Some(path) = lookup(MODEL_PATH_ENV) {
            self.model_path = PathBuf::from(path);
        }
        if let Some(addr) = lookup(BIND_ADDR_ENV) {
            self.bind_addr = addr
                .parse()
                .map_err(|e| eyre::eyre!("invalid {BIND_ADDR_ENV} '{addr}': {e}"))?;
        }
        Ok(self)
    }
}

/// Defaults, then the optional config file, then environment overrides.
pub fn load_config() -> eyre::Result<ServerConfig> {
    let base = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let config = ServerConfig::from_file(Path::new(&path))?;
            tracing::info!(path = %path, "config loaded");
            config
        }
        Err(_) => ServerConfig::default(),
    };
    base.apply_overrides(|key| std::env::var(key).ok())
}
