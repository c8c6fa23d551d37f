use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// "none" | "log" | "posthog"
    pub backend: String,
    #[serde(default)]
    pub posthog_api_key: Option<String>,
    #[serde(default = "default_posthog_host")]
    pub posthog_host: String,
    /// Buffered events before a batch is sent
    #[serde(default = "default_flush_at")]
    pub flush_at: usize,
    /// Milliseconds between time-based sends; 0 disables them
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,
    #[serde(default = "default_distinct_id")]
    pub distinct_id: String,
}

fn default_posthog_host() -> String {
    "https://app.posthog.com".into()
}

fn default_flush_at() -> usize {
    1
}

fn default_flush_interval_ms() -> u64 {
    1000
}

fn default_distinct_id() -> String {
    "system".into()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            backend: "none".into(),
            posthog_api_key: None,
            posthog_host: default_posthog_host(),
            flush_at: default_flush_at(),
            flush_interval_ms: default_flush_interval_ms(),
            distinct_id: default_distinct_id(),
        }
    }
}
