use crate::links::{EntityKind, MusicService};
use std::time::Duration;

/// Events the observer can record
#[derive(Debug, Clone)]
pub enum ObserverEvent {
    ProcessStarted,
    CommandInvoked {
        command: String,
    },
    NoSupportedLink,
    ConversionStart {
        source_service: MusicService,
        source_url: String,
    },
    ConversionSuccess {
        source_service: MusicService,
        sync_id: String,
        entity_type: EntityKind,
        has_shortcode: bool,
        available_services: Vec<String>,
        link: String,
        duration: Duration,
    },
    ConversionFailed {
        source_service: MusicService,
        source_url: String,
        duration: Duration,
    },
    Error {
        component: String,
        message: String,
    },
}

impl ObserverEvent {
    /// Stable snake_case name used as the analytics event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProcessStarted => "process_started",
            Self::CommandInvoked { .. } => "command_invoked",
            Self::NoSupportedLink => "no_supported_link",
            Self::ConversionStart { .. } => "conversion_start",
            Self::ConversionSuccess { .. } => "conversion_success",
            Self::ConversionFailed { .. } => "conversion_failed",
            Self::Error { .. } => "error",
        }
    }
}

/// Numeric metrics
#[derive(Debug, Clone)]
pub enum ObserverMetric {
    RequestLatency(Duration),
    ServiceLinksBuilt { attempted: u64, built: u64 },
}

/// Sink for pipeline events and metrics. Implementations must not block.
pub trait Observer: Send + Sync {
    /// Record a discrete event
    fn record_event(&self, event: &ObserverEvent);

    /// Record a numeric metric
    fn record_metric(&self, metric: &ObserverMetric);

    /// Flush any buffered data (no-op for most backends)
    fn flush(&self) {}

    /// Human-readable name of this observer
    fn name(&self) -> &str;
}

pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
