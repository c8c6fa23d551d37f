use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// A streaming service recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MusicService {
    Spotify,
    AppleMusic,
    YtMusic,
}

impl MusicService {
    /// Tag the conversion API expects in `createUrl` bodies.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Spotify => "spotify",
            Self::AppleMusic => "applemusic",
            Self::YtMusic => "ytmusic",
        }
    }

    /// Key under which the conversion API lists this service's native id.
    pub fn external_key(self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::AppleMusic => "AppleMusic",
            Self::YtMusic => "YouTube",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Spotify => "Open in Spotify",
            Self::AppleMusic => "Open in Apple Music",
            Self::YtMusic => "Open in YouTube Music",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::AppleMusic => "Apple Music",
            Self::YtMusic => "YouTube Music",
        }
    }
}

/// A URL guaranteed to carry an explicit `http`/`https` scheme and to parse.
///
/// Holds the candidate text exactly as extracted; no re-serialization
/// through [`Url`] (which would append a trailing `/` to bare hosts).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn parse(candidate: &str) -> Option<Self> {
        let parsed = Url::parse(candidate).ok()?;
        match parsed.scheme() {
            "http" | "https" => Some(Self(candidate.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased hostname, if the URL has one.
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.0)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Song, album or artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Song,
    Album,
    Artist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Cross-service record returned by the lookup endpoint.
///
/// Fields the crate does not model are kept in `extra` so the entity can be
/// handed back to `createUrl` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncEntity {
    #[serde(default)]
    pub sync_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_strings",
        skip_serializing_if = "Option::is_none"
    )]
    pub artists: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ids: Option<BTreeMap<String, Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub songs: Option<Vec<TrackRef>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Accepts `null` entries in a string list and drops them.
fn present_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|items| items.into_iter().flatten().collect()))
}

impl SyncEntity {
    pub fn shortcode(&self) -> Option<&str> {
        non_empty(self.shortcode.as_ref())
    }

    /// Native id for `service`, when the API knows one.
    pub fn external_id(&self, service: MusicService) -> Option<&str> {
        self.external_ids
            .as_ref()
            .and_then(|ids| non_empty(ids.get(service.external_key())?.as_ref()))
    }

    pub fn available_services(&self) -> Vec<String> {
        self.external_ids
            .as_ref()
            .map(|ids| ids.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Heuristic: a track list means album, a name without a title means
    /// artist, anything else is a song. The API does not report the kind.
    pub fn infer_kind(&self) -> EntityKind {
        if self.songs.as_ref().is_some_and(|songs| !songs.is_empty()) {
            return EntityKind::Album;
        }
        if non_empty(self.name.as_ref()).is_some() && non_empty(self.title.as_ref()).is_none() {
            return EntityKind::Artist;
        }
        EntityKind::Song
    }

    pub fn display_title(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Artist => non_empty(self.name.as_ref()).unwrap_or("Unknown Artist"),
            EntityKind::Song | EntityKind::Album => {
                non_empty(self.title.as_ref()).unwrap_or("Unknown Title")
            }
        }
    }
}

/// A resolved entity plus its canonical share link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub link: String,
    pub entity: SyncEntity,
    pub kind: EntityKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "service")]
pub enum LinkOrigin {
    SyncFm,
    Service(MusicService),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceLink {
    pub origin: LinkOrigin,
    pub label: String,
    pub url: String,
}

impl ServiceLink {
    pub fn canonical(url: impl Into<String>) -> Self {
        Self {
            origin: LinkOrigin::SyncFm,
            label: "Open in SyncFM".into(),
            url: url.into(),
        }
    }

    pub fn for_service(service: MusicService, url: impl Into<String>) -> Self {
        Self {
            origin: LinkOrigin::Service(service),
            label: service.label().into(),
            url: url.into(),
        }
    }
}

/// Per-call limits for conversion API requests.
///
/// `timeout` of `None` defers to the client's own timeout.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub timeout: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl CallOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            cancellation: None,
        }
    }

    #[must_use]
    pub fn cancelled_by(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}
