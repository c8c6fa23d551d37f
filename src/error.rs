use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `syncfm-discord`.
///
/// Library callers can match on these to decide what to show a user;
/// CLI and REST plumbing continues to use `anyhow::Result` for context chains.
#[derive(Debug, Error)]
pub enum SyncError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Conversion API ──────────────────────────────────────────────────
    #[error("conversion: {0}")]
    Conversion(#[from] ConversionError),

    // ── Discord REST ────────────────────────────────────────────────────
    #[error("discord: {0}")]
    Discord(#[from] DiscordError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Conversion API errors ──────────────────────────────────────────────────

/// Why a single call to the conversion API produced nothing usable.
///
/// These never escape the resolver or link builder; they are logged,
/// reported to the observer and folded into a typed outcome.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("{endpoint} returned HTTP {status}")]
    Http { endpoint: &'static str, status: u16 },

    #[error("{endpoint} request failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    #[error("{endpoint} returned an unusable body: {message}")]
    InvalidBody {
        endpoint: &'static str,
        message: String,
    },

    #[error("lookup response missing syncId")]
    MissingSyncId,

    #[error("createUrl response for {service} carried no url")]
    MissingUrl { service: String },

    #[error("{endpoint} timed out")]
    TimedOut { endpoint: &'static str },

    #[error("{endpoint} cancelled")]
    Cancelled { endpoint: &'static str },
}

// ─── Pipeline failures ──────────────────────────────────────────────────────

/// Terminal failure of one pipeline run.
///
/// A per-service link build failure is deliberately absent: it only drops
/// that service's link from an otherwise successful outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionFailure {
    #[error("no supported music link found")]
    NoLinkFound,

    #[error("failed to convert {source_url}")]
    ResolutionFailed { source_url: String },
}

// ─── Discord errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("request {method} {url} failed ({status}): {body}")]
    Request {
        method: String,
        url: String,
        status: u16,
        body: String,
    },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, SyncError>;
