//! Event sinks: structured logging for production, recording for tests.

use std::sync::Mutex;

use crate::domain::DomainEvent;
use crate::ports::EventSink;

/// Emits domain events as structured `tracing` records.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &DomainEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => {
                tracing::info!(event = event.name(), payload = %payload, "domain event");
            }
            Err(err) => {
                // Event delivery must not fail the write that produced it.
                tracing::warn!(event = event.name(), error = %err, "failed to encode domain event");
            }
        }
    }
}

/// Collects events in order for test assertions.
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name()).collect()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: &DomainEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
