use super::types::{MusicService, NormalizedUrl};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use url::Url;

/// One accepted host suffix.
///
/// `generic` marks hosts that only count when generic video hosts are
/// switched on (plain `youtube.com`, `youtu.be`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRule {
    pub suffix: String,
    pub generic: bool,
}

impl HostRule {
    pub fn dedicated(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into().to_ascii_lowercase(),
            generic: false,
        }
    }

    pub fn generic(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into().to_ascii_lowercase(),
            generic: true,
        }
    }

    fn matches(&self, host: &str) -> bool {
        host == self.suffix
            || host
                .strip_suffix(self.suffix.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    }
}

/// Ordered service → host-suffix table. First matching service wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTable {
    entries: Vec<(MusicService, Vec<HostRule>)>,
}

impl Default for HostTable {
    fn default() -> Self {
        Self::new(vec![
            (MusicService::Spotify, vec![HostRule::dedicated("spotify.com")]),
            (
                MusicService::AppleMusic,
                vec![HostRule::dedicated("music.apple.com")],
            ),
            (
                MusicService::YtMusic,
                vec![
                    HostRule::dedicated("music.youtube.com"),
                    HostRule::generic("youtube.com"),
                    HostRule::generic("youtu.be"),
                ],
            ),
        ])
    }
}

impl HostTable {
    pub fn new(entries: Vec<(MusicService, Vec<HostRule>)>) -> Self {
        Self { entries }
    }

    pub fn services(&self) -> impl Iterator<Item = MusicService> + '_ {
        self.entries.iter().map(|(service, _)| *service)
    }

    /// Suffixes in effect for `service` given the generic-host switch.
    pub fn hosts_for(&self, service: MusicService, allow_generic: bool) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(s, _)| *s == service)
            .flat_map(|(_, rules)| rules.iter())
            .filter(|rule| allow_generic || !rule.generic)
            .map(|rule| rule.suffix.as_str())
            .collect()
    }

    pub fn lookup(&self, host: &str, allow_generic: bool) -> Option<MusicService> {
        self.entries.iter().find_map(|(service, rules)| {
            rules
                .iter()
                .filter(|rule| allow_generic || !rule.generic)
                .any(|rule| rule.matches(host))
                .then_some(*service)
        })
    }
}

/// Maps URLs to the streaming service that owns their host.
///
/// Cloning shares the generic-host switch, so a toggle through any clone is
/// seen by the next `classify` call on every other clone.
#[derive(Debug, Clone)]
pub struct ServiceClassifier {
    table: Arc<HostTable>,
    generic_video_hosts: Arc<AtomicBool>,
}

impl Default for ServiceClassifier {
    fn default() -> Self {
        Self::new(HostTable::default(), false)
    }
}

impl ServiceClassifier {
    pub fn new(table: HostTable, generic_video_hosts: bool) -> Self {
        Self {
            table: Arc::new(table),
            generic_video_hosts: Arc::new(AtomicBool::new(generic_video_hosts)),
        }
    }

    pub fn with_generic_video_hosts(enabled: bool) -> Self {
        Self::new(HostTable::default(), enabled)
    }

    pub fn table(&self) -> &HostTable {
        &self.table
    }

    pub fn generic_video_hosts(&self) -> bool {
        self.generic_video_hosts.load(Ordering::Relaxed)
    }

    pub fn set_generic_video_hosts(&self, enabled: bool) {
        self.generic_video_hosts.store(enabled, Ordering::Relaxed);
    }

    /// Classify a raw URL string. Unparseable input yields `None`.
    pub fn classify(&self, url: &str) -> Option<MusicService> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?.to_ascii_lowercase();
        self.table.lookup(&host, self.generic_video_hosts())
    }

    pub fn classify_normalized(&self, url: &NormalizedUrl) -> Option<MusicService> {
        self.table.lookup(&url.host()?, self.generic_video_hosts())
    }
}
