use super::traits::{Observer, ObserverEvent, ObserverMetric, duration_ms};
use tracing::info;

/// Writes every event and metric as a structured `tracing` line
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for LogObserver {
    fn record_event(&self, event: &ObserverEvent) {
        match event {
            ObserverEvent::ProcessStarted => {
                info!("process.started");
            }
            ObserverEvent::CommandInvoked { command } => {
                info!(command = %command, "command.invoked");
            }
            ObserverEvent::NoSupportedLink => {
                info!("conversion.no_supported_link");
            }
            ObserverEvent::ConversionStart {
                source_service,
                source_url,
            } => {
                info!(source_service = %source_service, source_url = %source_url, "conversion.start");
            }
            ObserverEvent::ConversionSuccess {
                source_service,
                sync_id,
                entity_type,
                has_shortcode,
                available_services,
                link,
                duration,
            } => {
                info!(
                    source_service = %source_service,
                    sync_id = %sync_id,
                    entity_type = %entity_type,
                    has_shortcode = has_shortcode,
                    available_services = ?available_services,
                    link = %link,
                    duration_ms = duration_ms(*duration),
                    "conversion.success"
                );
            }
            ObserverEvent::ConversionFailed {
                source_service,
                source_url,
                duration,
            } => {
                info!(
                    source_service = %source_service,
                    source_url = %source_url,
                    duration_ms = duration_ms(*duration),
                    "conversion.failed"
                );
            }
            ObserverEvent::Error { component, message } => {
                info!(component = %component, error = %message, "error");
            }
        }
    }

    fn record_metric(&self, metric: &ObserverMetric) {
        match metric {
            ObserverMetric::RequestLatency(d) => {
                info!(latency_ms = duration_ms(*d), "metric.request_latency");
            }
            ObserverMetric::ServiceLinksBuilt { attempted, built } => {
                info!(attempted = attempted, built = built, "metric.service_links_built");
            }
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}
