use anyhow::Result;
use serde_json::json;

use super::http_client::DiscordHttpClient;
use super::types::{
    ApplicationCommandType, CONVERT_COMMAND_NAME, CommandOptionType, INTEGRATION_TYPES,
    INTERACTION_CONTEXTS, RegisteredCommand, SHARE_COMMAND_NAME, SHARE_URL_OPTION,
};

/// The message context menu entry and the `/share` slash command.
pub fn build_default_commands() -> Vec<serde_json::Value> {
    vec![
        json!({
            "name": CONVERT_COMMAND_NAME,
            "type": ApplicationCommandType::Message as u8,
            "integration_types": INTEGRATION_TYPES,
            "contexts": INTERACTION_CONTEXTS,
        }),
        json!({
            "name": SHARE_COMMAND_NAME,
            "description": "Convert a music link to SyncFM and share it with the channel",
            "type": ApplicationCommandType::ChatInput as u8,
            "integration_types": INTEGRATION_TYPES,
            "contexts": INTERACTION_CONTEXTS,
            "options": [
                {
                    "name": SHARE_URL_OPTION,
                    "description": "Music link from Spotify, Apple Music, or YouTube Music",
                    "type": CommandOptionType::String as u8,
                    "required": true
                }
            ]
        }),
    ]
}

pub async fn register_commands(
    http: &DiscordHttpClient,
    application_id: &str,
) -> Result<Vec<RegisteredCommand>> {
    let registered = http
        .put_commands(application_id, &build_default_commands())
        .await?;
    tracing::info!(count = registered.len(), "registered Discord commands");
    Ok(registered)
}

pub async fn list_commands(
    http: &DiscordHttpClient,
    application_id: &str,
) -> Result<Vec<RegisteredCommand>> {
    http.list_commands(application_id).await
}

pub async fn clear_commands(http: &DiscordHttpClient, application_id: &str) -> Result<()> {
    let _remaining = http.put_commands(application_id, &[]).await?;
    tracing::info!("cleared Discord commands");
    Ok(())
}

/// Value of the `url` option when `data` is a `/share` invocation.
pub fn extract_share_command_url(data: &serde_json::Value) -> Option<String> {
    let name = data.get("name")?.as_str()?;
    if name != SHARE_COMMAND_NAME {
        return None;
    }

    data.get("options")
        .and_then(|opts| opts.as_array())
        .and_then(|opts| {
            opts.iter().find_map(|opt| {
                let opt_name = opt.get("name")?.as_str()?;
                if opt_name == SHARE_URL_OPTION {
                    opt.get("value")?.as_str().map(String::from)
                } else {
                    None
                }
            })
        })
}

/// True when `data` is the "Convert to SyncFM" message context menu.
pub fn is_convert_context_command(data: &serde_json::Value) -> bool {
    let is_message_command = data
        .get("type")
        .and_then(serde_json::Value::as_u64)
        .and_then(ApplicationCommandType::from_u64)
        == Some(ApplicationCommandType::Message);
    is_message_command
        && data.get("name").and_then(serde_json::Value::as_str) == Some(CONVERT_COMMAND_NAME)
}
