use serde::{Deserialize, Serialize};

/// Where and how to reach the SyncFM conversion API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncFmConfig {
    /// Base of `/api/handle/{provider}` and `/api/createUrl`
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Base of `/s/{shortcode}` share links
    #[serde(default = "default_share_base")]
    pub share_base: String,
    /// Provider tag used for lookups and long-form share links
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://syncfm.dev".into()
}

fn default_share_base() -> String {
    "https://syncfm.dev".into()
}

fn default_provider() -> String {
    "syncfm".into()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for SyncFmConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            share_base: default_share_base(),
            provider: default_provider(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
