mod channels;
mod core;
mod observability;
mod syncfm;

pub use channels::DiscordConfig;
pub use self::core::Config;
pub use observability::ObservabilityConfig;
pub use syncfm::SyncFmConfig;
