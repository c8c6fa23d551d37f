//! Discord API constants and type definitions.

use serde::Deserialize;

/// Discord API base URL (v10).
pub const API_BASE: &str = "https://discord.com/api/v10";

/// Name of the message context menu command.
pub const CONVERT_COMMAND_NAME: &str = "Convert to SyncFM";

/// Name of the slash command and its single option.
pub const SHARE_COMMAND_NAME: &str = "share";
pub const SHARE_URL_OPTION: &str = "url";

/// Guild install (0) and user install (1).
pub const INTEGRATION_TYPES: [u8; 2] = [0, 1];

/// Guild (0), bot DM (1) and private channel (2).
pub const INTERACTION_CONTEXTS: [u8; 3] = [0, 1, 2];

/// Discord application command types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ApplicationCommandType {
    ChatInput = 1,
    User = 2,
    Message = 3,
}

impl ApplicationCommandType {
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::ChatInput),
            2 => Some(Self::User),
            3 => Some(Self::Message),
            _ => None,
        }
    }
}

/// Application command option types used here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandOptionType {
    String = 3,
}

/// The subset of a registered command the CLI reports back.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredCommand {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default = "default_command_type")]
    pub kind: u8,
    #[serde(default)]
    pub description: String,
}

fn default_command_type() -> u8 {
    ApplicationCommandType::ChatInput as u8
}

impl RegisteredCommand {
    pub fn kind_label(&self) -> &'static str {
        match ApplicationCommandType::from_u64(u64::from(self.kind)) {
            Some(ApplicationCommandType::ChatInput) => "slash",
            Some(ApplicationCommandType::User) => "user",
            Some(ApplicationCommandType::Message) => "message",
            None => "unknown",
        }
    }
}
