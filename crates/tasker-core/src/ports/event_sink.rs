//! EventSink port - where domain events go.
//!
//! Emission is infallible from the service's point of view: a sink that
//! fails to record an event deals with that itself (log and move on). Event
//! delivery never blocks or fails a write that already succeeded.

use crate::domain::DomainEvent;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &DomainEvent);
}
