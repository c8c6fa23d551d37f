//! Discord REST surface: application command definitions, their
//! registration, and helpers for reading interaction payloads.
//!
//! The gateway connection and reply rendering live with the platform
//! layer; this module only talks to the REST API.

pub mod commands;
pub mod http_client;
pub mod types;

pub use commands::{
    build_default_commands, clear_commands, extract_share_command_url,
    is_convert_context_command, list_commands, register_commands,
};
pub use http_client::DiscordHttpClient;
pub use types::{ApplicationCommandType, RegisteredCommand};

use crate::config::DiscordConfig;
use crate::error::DiscordError;

/// Build a REST client and return it with the application id, failing when
/// either credential is missing.
pub fn client_from_config(config: &DiscordConfig) -> Result<(DiscordHttpClient, String), DiscordError> {
    let token = config
        .bot_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(DiscordError::MissingCredential("DISCORD_BOT_TOKEN"))?;
    let client_id = config
        .client_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(DiscordError::MissingCredential("DISCORD_CLIENT_ID"))?;
    Ok((
        DiscordHttpClient::with_api_base(&config.api_base, token),
        client_id.to_string(),
    ))
}
