use super::super::{DiscordConfig, ObservabilityConfig, SyncFmConfig};
use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

pub(super) const CONFIG_DIR_NAME: &str = ".syncfm-discord";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub syncfm: SyncFmConfig,

    #[serde(default)]
    pub discord: DiscordConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
        home.join(CONFIG_DIR_NAME).join("config.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("syncfm.api_base", &self.syncfm.api_base),
            ("syncfm.share_base", &self.syncfm.share_base),
            ("discord.api_base", &self.discord.api_base),
        ] {
            let parsed = Url::parse(value)
                .map_err(|e| ConfigError::Validation(format!("{field} is not a URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::Validation(format!(
                    "{field} must use http or https, got {}",
                    parsed.scheme()
                )));
            }
        }

        if self.syncfm.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "syncfm.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.syncfm.provider.trim().is_empty() {
            return Err(ConfigError::Validation("syncfm.provider must not be empty".into()));
        }
        Ok(())
    }
}
