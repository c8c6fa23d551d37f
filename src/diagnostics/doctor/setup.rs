use crate::config::Config;

const PREVIEW_CHARS: usize = 8;

/// True when a value still looks like the `.env.example` template.
pub(crate) fn is_placeholder(value: &str) -> bool {
    value.contains("your_") || value.contains("_here")
}

/// First eight characters followed by `...`.
pub(crate) fn preview(value: &str) -> String {
    let head: String = value.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

fn credential_check(name: &str, value: Option<&str>) -> (bool, String) {
    match value.filter(|v| !v.is_empty()) {
        None => (false, format!("{name}: not set")),
        Some(v) if is_placeholder(v) => (false, format!("{name}: still a placeholder value")),
        Some(v) => (true, format!("{name}: {}", preview(v))),
    }
}

pub(crate) fn run_setup_checks(config: &Config) -> Vec<(bool, String)> {
    let mut checks: Vec<(bool, String)> = Vec::new();

    let config_exists = config.config_path.exists();
    checks.push((
        config_exists,
        format!(
            "Config file: {}",
            if config_exists {
                config.config_path.display().to_string()
            } else {
                format!("missing ({})", config.config_path.display())
            }
        ),
    ));

    checks.push(credential_check(
        "DISCORD_BOT_TOKEN",
        config.discord.bot_token.as_deref(),
    ));
    checks.push(credential_check(
        "DISCORD_CLIENT_ID",
        config.discord.client_id.as_deref(),
    ));

    checks
}

/// Informational lines; never counted as failures.
pub(crate) fn optional_setting_lines(config: &Config) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);
    lines.push(format!(
        "YouTube links: {}",
        if config.discord.enable_youtube {
            "enabled"
        } else {
            "disabled (music.youtube.com only)"
        }
    ));
    lines.push(format!("SyncFM API: {}", config.syncfm.api_base));
    lines.push(format!(
        "Analytics: {}",
        match config.observability.backend.as_str() {
            "posthog" => format!("posthog ({})", config.observability.posthog_host),
            other => other.to_string(),
        }
    ));
    lines
}
