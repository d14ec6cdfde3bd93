use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};
use std::time::Duration;

use crate::domain::SortKey;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub message_timeout_secs: u64,
    pub default_sort: SortKey,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_timeout_secs: 5,
            default_sort: SortKey::Name,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl UiConfig {
    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("api.base_url", "http://127.0.0.1:8000")?
            .set_default("api.timeout_secs", 10)?
            .set_default("ui.message_timeout_secs", 5)?
            .set_default("ui.default_sort", "name")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with ROSTER__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("ROSTER").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://127.0.0.1:8000".to_string(),
                timeout_secs: 10,
            },
            ui: UiConfig::default(),
        }
    }
}
