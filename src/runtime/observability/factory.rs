use super::{LogObserver, NoopObserver, Observer, PosthogObserver};
use crate::config::ObservabilityConfig;
use std::sync::Arc;
use std::time::Duration;

/// Observer plus whatever the process must drain before exit.
pub struct ObserverHandle {
    observer: Arc<dyn Observer>,
    posthog: Option<Arc<PosthogObserver>>,
}

impl ObserverHandle {
    pub fn observer(&self) -> Arc<dyn Observer> {
        Arc::clone(&self.observer)
    }

    /// Send any buffered analytics. Failures are logged, never returned.
    pub async fn shutdown(&self) {
        if let Some(posthog) = &self.posthog
            && let Err(e) = posthog.shutdown().await
        {
            tracing::warn!(error = %e, "posthog shutdown flush failed");
        }
    }
}

/// Factory: create the right observer from config
pub fn create_observer(config: &ObservabilityConfig) -> Arc<dyn Observer> {
    create_observer_handle(config).observer
}

pub fn create_observer_handle(config: &ObservabilityConfig) -> ObserverHandle {
    let noop = || ObserverHandle {
        observer: Arc::new(NoopObserver),
        posthog: None,
    };
    match config.backend.as_str() {
        "log" => ObserverHandle {
            observer: Arc::new(LogObserver::new()),
            posthog: None,
        },
        "posthog" => match config.posthog_api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => {
                let posthog = Arc::new(PosthogObserver::new(
                    &config.posthog_host,
                    key,
                    config.distinct_id.clone(),
                    config.flush_at,
                ));
                posthog.start_interval_flush(Duration::from_millis(config.flush_interval_ms));
                ObserverHandle {
                    observer: posthog.clone(),
                    posthog: Some(posthog),
                }
            }
            None => {
                tracing::warn!("posthog backend selected without an API key, falling back to noop");
                noop()
            }
        },
        "none" | "noop" => noop(),
        _ => {
            tracing::warn!(
                "Unknown observability backend '{}', falling back to noop",
                config.backend
            );
            noop()
        }
    }
}
