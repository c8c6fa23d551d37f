#![allow(dead_code)]

use std::sync::Mutex;

use syncfm_discord::runtime::observability::{Observer, ObserverEvent, ObserverMetric};

/// Observer that keeps every event name for later assertions.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObserverEvent>>,
    metrics: Mutex<Vec<ObserverMetric>>,
}

impl RecordingObserver {
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(ObserverEvent::name)
            .collect()
    }

    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn metrics(&self) -> Vec<ObserverMetric> {
        self.metrics.lock().unwrap().clone()
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
