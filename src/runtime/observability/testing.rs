use super::traits::{Observer, ObserverEvent, ObserverMetric};
use std::sync::Mutex;

/// Observer that keeps every event for assertions.
#[derive(Default)]
pub(crate) struct RecordingObserver {
    events: Mutex<Vec<ObserverEvent>>,
    metrics: Mutex<Vec<ObserverMetric>>,
}

impl RecordingObserver {
    pub(crate) fn event_names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(ObserverEvent::name).collect()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                ObserverEvent::Error { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn metric_count(&self) -> usize {
        self.metrics.lock().unwrap().len()
    }
}

impl Observer for RecordingObserver {
    fn record_event(&self, event: &ObserverEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn record_metric(&self, metric: &ObserverMetric) {
        self.metrics.lock().unwrap().push(metric.clone());
    }

    fn name(&self) -> &str {
        "recording"
    }
}
