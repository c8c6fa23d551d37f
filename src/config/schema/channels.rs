use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Application (client) id used for command registration
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default = "default_discord_api_base")]
    pub api_base: String,
    /// Accept plain `youtube.com` / `youtu.be` links as YouTube Music sources.
    #[serde(default)]
    pub enable_youtube: bool,
}

fn default_discord_api_base() -> String {
    "https://discord.com/api/v10".into()
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            client_id: None,
            api_base: default_discord_api_base(),
            enable_youtube: false,
        }
    }
}
