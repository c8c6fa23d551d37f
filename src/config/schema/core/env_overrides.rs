use super::Config;

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(token) = env_non_empty("DISCORD_BOT_TOKEN") {
            self.discord.bot_token = Some(token);
        }

        if let Some(client_id) = env_non_empty("DISCORD_CLIENT_ID") {
            self.discord.client_id = Some(client_id);
        }

        if let Some(enabled) = env_flag("DISCORD_ENABLE_YOUTUBE") {
            self.discord.enable_youtube = enabled;
        }

        if let Some(base) = env_non_empty("SYNCFM_API_BASE") {
            self.syncfm.api_base = base;
        }

        if let Some(key) = env_non_empty("POSTHOG_API_KEY") {
            self.observability.posthog_api_key = Some(key);
            self.observability.backend = "posthog".into();
        }

        if let Some(host) = env_non_empty("POSTHOG_HOST") {
            self.observability.posthog_host = host;
        }

        if let Ok(flush_at) = std::env::var("POSTHOG_FLUSH_AT")
            && let Ok(flush_at) = flush_at.parse::<usize>()
            && flush_at > 0
        {
            self.observability.flush_at = flush_at;
        }

        if let Ok(interval) = std::env::var("POSTHOG_FLUSH_INTERVAL_MS")
            && let Ok(interval) = interval.parse::<u64>()
            && interval > 0
        {
            self.observability.flush_interval_ms = interval;
        }

        if env_flag("POSTHOG_DISABLED") == Some(true) && self.observability.backend == "posthog" {
            self.observability.backend = "none".into();
        }
    }
}
