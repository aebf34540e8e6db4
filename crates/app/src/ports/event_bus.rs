//! Event bus port — publish/subscribe for zone events.

use std::future::Future;

use geozone_domain::error::GeozoneError;
use geozone_domain::event::ZoneEvent;

/// Publishes zone events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: ZoneEvent) -> impl Future<Output = Result<(), GeozoneError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: ZoneEvent) -> impl Future<Output = Result<(), GeozoneError>> + Send {
        (**self).publish(event)
    }
}
