use super::traits::{Observer, ObserverEvent, ObserverMetric, duration_ms};
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

const EVENT_PREFIX: &str = "discord-syncfm-";
const STARTED_EVENT: &str = "discord-bot-started";

/// Analytics observer that batches events to a PostHog `/batch/` endpoint.
///
/// Events are buffered until `flush_at` is reached, then sent on a spawned
/// task. [`PosthogObserver::start_interval_flush`] adds a time-based trigger.
/// Call [`PosthogObserver::shutdown`] before exit to wait for those tasks and
/// drain the buffer.
pub struct PosthogObserver {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    distinct_id: String,
    flush_at: usize,
    buffer: Mutex<Vec<Value>>,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    stop: CancellationToken,
}

impl PosthogObserver {
    pub fn new(
        host: &str,
        api_key: impl Into<String>,
        distinct_id: impl Into<String>,
        flush_at: usize,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            endpoint: format!("{}/batch/", host.trim_end_matches('/')),
            api_key: api_key.into(),
            distinct_id: distinct_id.into(),
            flush_at: flush_at.max(1),
            buffer: Mutex::new(Vec::new()),
            in_flight: Mutex::new(Vec::new()),
            ticker: Mutex::new(None),
            stop: CancellationToken::new(),
        }
    }

    /// Send whatever is buffered every `every`, until shutdown.
    ///
    /// A zero interval or a missing tokio runtime leaves only the
    /// `flush_at` trigger.
    pub fn start_interval_flush(self: &Arc<Self>, every: Duration) {
        if every.is_zero() {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no tokio runtime; posthog interval flush disabled");
            return;
        };
        let weak = Arc::downgrade(self);
        let stop = self.stop.clone();
        let task = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                tokio::select! {
                    () = stop.cancelled() => break,
                    _ = ticker.tick() => {
                        let Some(observer) = weak.upgrade() else { break };
                        if observer.pending() > 0 {
                            observer.flush();
                        }
                    }
                }
            }
        });
        let previous = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    pub fn pending(&self) -> usize {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Wait for spawned sends, then send everything still buffered.
    pub async fn shutdown(&self) -> Result<()> {
        self.stop.cancel();
        let ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(ticker) = ticker
            && let Err(e) = ticker.await
        {
            tracing::warn!(error = %e, "posthog interval task failed");
        }

        let handles = std::mem::take(
            &mut *self.in_flight.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "posthog flush task failed");
            }
        }

        let batch = self.take_batch();
        if batch.is_empty() {
            return Ok(());
        }
        send_batch(&self.http, &self.endpoint, &self.api_key, batch).await
    }

    fn push(&self, event: String, properties: Value) {
        let payload = json!({
            "event": event,
            "distinct_id": self.distinct_id,
            "properties": properties,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "uuid": uuid::Uuid::new_v4().to_string(),
        });

        let ready = {
            let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
            buffer.push(payload);
            buffer.len() >= self.flush_at
        };
        if ready {
            self.spawn_flush();
        }
    }

    fn take_batch(&self) -> Vec<Value> {
        std::mem::take(&mut *self.buffer.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn spawn_flush(&self) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no tokio runtime; posthog batch stays buffered");
            return;
        };
        let batch = self.take_batch();
        if batch.is_empty() {
            return;
        }
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();
        let api_key = self.api_key.clone();
        let task = handle.spawn(async move {
            if let Err(e) = send_batch(&http, &endpoint, &api_key, batch).await {
                tracing::warn!(error = %e, "posthog batch failed");
            }
        });
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.retain(|t| !t.is_finished());
        in_flight.push(task);
    }
}

async fn send_batch(
    http: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    batch: Vec<Value>,
) -> Result<()> {
    let count = batch.len();
    let response = http
        .post(endpoint)
        .json(&json!({ "api_key": api_key, "batch": batch }))
        .send()
        .await
        .context("send posthog batch")?;
    if !response.status().is_success() {
        anyhow::bail!("posthog batch rejected ({})", response.status());
    }
    tracing::debug!(events = count, "posthog batch sent");
    Ok(())
}

fn event_name(event: &ObserverEvent) -> String {
    match event {
        ObserverEvent::ProcessStarted => STARTED_EVENT.to_string(),
        other => format!("{EVENT_PREFIX}{}", other.name().replace('_', "-")),
    }
}

fn event_properties(event: &ObserverEvent) -> Value {
    match event {
        ObserverEvent::ProcessStarted | ObserverEvent::NoSupportedLink => json!({}),
        ObserverEvent::CommandInvoked { command } => json!({ "command": command }),
        ObserverEvent::ConversionStart {
            source_service,
            source_url,
        } => json!({
            "sourceService": source_service,
            "sourceUrl": source_url,
        }),
        ObserverEvent::ConversionSuccess {
            source_service,
            sync_id,
            entity_type,
            has_shortcode,
            available_services,
            link,
            duration,
        } => json!({
            "sourceService": source_service,
            "syncId": sync_id,
            "entityType": entity_type,
            "hasShortcode": has_shortcode,
            "availableServices": available_services,
            "syncfmLink": link,
            "durationMs": duration_ms(*duration),
        }),
        ObserverEvent::ConversionFailed {
            source_service,
            source_url,
            duration,
        } => json!({
            "sourceService": source_service,
            "sourceUrl": source_url,
            "durationMs": duration_ms(*duration),
        }),
        ObserverEvent::Error { component, message } => json!({
            "component": component,
            "message": message,
        }),
    }
}

impl Observer for PosthogObserver {
    fn record_event(&self, event: &ObserverEvent) {
        self.push(event_name(event), event_properties(event));
    }

    fn record_metric(&self, _metric: &ObserverMetric) {}

    fn flush(&self) {
        self.spawn_flush();
    }

    fn name(&self) -> &str {
        "posthog"
    }
}
