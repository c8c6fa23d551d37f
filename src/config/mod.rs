pub mod schema;

pub use schema::{Config, DiscordConfig, ObservabilityConfig, SyncFmConfig};
