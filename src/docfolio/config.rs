use crate::error::{DocfolioError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_COPY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin123";

/// Configuration for docfolio, stored in `<data root>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocfolioConfig {
    /// Upper bound for copying a picked file into storage
    #[serde(default = "default_copy_timeout_secs")]
    pub copy_timeout_secs: u64,

    /// Simulated login user name
    #[serde(default = "default_username")]
    pub username: String,

    /// Simulated login password
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_copy_timeout_secs() -> u64 {
    DEFAULT_COPY_TIMEOUT_SECS
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

impl Default for DocfolioConfig {
    fn default() -> Self {
        Self {
            copy_timeout_secs: DEFAULT_COPY_TIMEOUT_SECS,
            username: default_username(),
            password: default_password(),
        }
    }
}

impl DocfolioConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DocfolioError::Io)?;
        let config: DocfolioConfig =
            serde_json::from_str(&content).map_err(DocfolioError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DocfolioError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DocfolioError::Serialization)?;
        fs::write(config_path, content).map_err(DocfolioError::Io)?;
        Ok(())
    }

    pub fn copy_timeout(&self) -> Duration {
        Duration::from_secs(self.copy_timeout_secs)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "copy-timeout" | "copy_timeout_secs" => Some(self.copy_timeout_secs.to_string()),
            "username" => Some(self.username.clone()),
            "password" => Some(self.password.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "copy-timeout" | "copy_timeout_secs" => {
                let secs: u64 = value.trim().parse().map_err(|_| {
                    DocfolioError::Api(format!("copy-timeout must be a whole number of seconds, got {:?}", value))
                })?;
                if secs == 0 {
                    return Err(DocfolioError::Api("copy-timeout must be at least 1 second".into()));
                }
                self.copy_timeout_secs = secs;
            }
            "username" => self.username = value.to_string(),
            "password" => self.password = value.to_string(),
            _ => return Err(DocfolioError::Api(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["copy-timeout", "username", "password"]
    }
}
