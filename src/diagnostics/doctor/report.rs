use crate::config::Config;
use crate::links::{CallOptions, NormalizedUrl, SyncFmClient};
use crate::runtime::observability::NoopObserver;
use crate::transport::channels::discord::{self, list_commands};
use std::sync::Arc;

/// Track used to prove the conversion API answers with a shareable entity.
pub(crate) const SAMPLE_TRACK_URL: &str = "https://open.spotify.com/track/3n3Ppam7vgaVa1iaRUc9Lp";

pub(crate) async fn check_discord_access(config: &Config) -> (bool, String) {
    let (http, client_id) = match discord::client_from_config(&config.discord) {
        Ok(pair) => pair,
        Err(e) => return (false, format!("Discord API: skipped ({e})")),
    };

    match list_commands(&http, &client_id).await {
        Ok(commands) => (
            true,
            format!(
                "Discord API: reachable ({} command(s) registered)",
                commands.len()
            ),
        ),
        Err(e) => (false, format!("Discord API: {e:#}")),
    }
}

pub(crate) async fn check_syncfm_api(config: &Config) -> (bool, String) {
    let Some(sample) = NormalizedUrl::parse(SAMPLE_TRACK_URL) else {
        return (false, "SyncFM API: invalid sample URL".to_string());
    };
    let client = SyncFmClient::new(&config.syncfm, Arc::new(NoopObserver));

    match client.try_resolve(&sample, &CallOptions::default()).await {
        Ok(result) => match result.entity.shortcode() {
            Some(code) => (
                true,
                format!("SyncFM API: working (shortcode {code}, {})", result.link),
            ),
            None => (
                false,
                "SyncFM API: responded without a shortcode".to_string(),
            ),
        },
        Err(e) => (false, format!("SyncFM API: {e}")),
    }
}
