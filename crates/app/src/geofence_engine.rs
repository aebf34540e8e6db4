//! Geofence engine — turns raw location samples into zone enter/exit events.
//!
//! The engine keeps the last known position and zone of every device it has
//! heard from. Each call to [`GeofenceEngine::ingest_location`] re-resolves
//! the device's zone membership and compares it against the previous one:
//!
//! | previous        | new             | emitted                  |
//! |-----------------|-----------------|--------------------------|
//! | none            | none            | nothing                  |
//! | none            | zone Z          | enter(Z)                 |
//! | zone Z          | none            | exit(Z)                  |
//! | zone Z          | zone Z          | nothing                  |
//! | zone Z          | zone W          | exit(Z), then enter(W)   |
//!
//! The engine owns no timer and no background loop; whatever drives the
//! location samples (a BLE scanner, a GPS feed, the demo simulator) calls
//! `ingest_location` from the outside.

use std::collections::HashMap;

use tokio::sync::Mutex;

use geozone_domain::error::GeozoneError;
use geozone_domain::event::ZoneEvent;
use geozone_domain::geo::GeoPoint;
use geozone_domain::id::{DeviceId, ZoneId};
use geozone_domain::position::DevicePosition;
use geozone_domain::zone::Zone;

use crate::ports::{EventPublisher, ZoneRepository};

/// Transition detector over a zone repository and an event publisher.
///
/// All of `ingest_location` runs under one internal lock, so concurrent
/// location sources can share a single engine without observing torn
/// position state or double-emitting transitions.
pub struct GeofenceEngine<R, E> {
    zones: R,
    events: E,
    positions: Mutex<HashMap<DeviceId, DevicePosition>>,
}

impl<R: ZoneRepository, E: EventPublisher> GeofenceEngine<R, E> {
    /// Create an engine over the given zone repository and event publisher.
    pub fn new(zones: R, events: E) -> Self {
        Self {
            zones,
            events,
            positions: Mutex::new(HashMap::new()),
        }
    }

    /// Record a fresh location sample for a device and emit any resulting
    /// transition events.
    ///
    /// The first sample for an unknown device starts it outside every zone.
    /// Emitted events are published to the bus before the call returns and
    /// also handed back to the caller, in emission order.
    ///
    /// # Errors
    ///
    /// Returns [`GeozoneError::Validation`] for out-of-range or non-finite
    /// coordinates — the sample is discarded and no state changes — or a
    /// storage error from the zone repository.
    pub async fn ingest_location(
        &self,
        device_id: DeviceId,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ZoneEvent>, GeozoneError> {
        let point = GeoPoint::new(latitude, longitude);
        point.validate()?;

        // One critical section per sample: resolve, update, publish.
        let mut positions = self.positions.lock().await;

        let zones = self.zones.get_all().await?;
        let new_zone = resolve_zone(&zones, &device_id, point);

        let record = positions
            .entry(device_id.clone())
            .or_insert_with(|| DevicePosition::new(device_id.clone(), point));
        let previous = record.current_zone_id;
        record.point = point;
        record.current_zone_id = new_zone;

        let events = transition_events(&device_id, previous, new_zone);
        if events.is_empty() {
            tracing::debug!(device = %device_id, latitude, longitude, "sample without transition");
        }
        for event in &events {
            tracing::info!(
                device = %event.device_id,
                zone = %event.zone_id,
                kind = ?event.kind,
                "zone transition"
            );
            self.events.publish(event.clone()).await?;
        }
        Ok(events)
    }

    /// Last known position of a device, if it ever reported one.
    pub async fn position(&self, device_id: &DeviceId) -> Option<DevicePosition> {
        self.positions.lock().await.get(device_id).cloned()
    }
}

/// First active zone, in registry order, that the device belongs to and
/// whose geofence contains the point.
///
/// Overlaps resolve to the earliest-registered zone; see DESIGN.md for the
/// precedence decision.
fn resolve_zone(zones: &[Zone], device_id: &DeviceId, point: GeoPoint) -> Option<ZoneId> {
    zones
        .iter()
        .filter(|zone| zone.is_active && zone.is_member(device_id))
        .find(|zone| zone.contains(point))
        .map(|zone| zone.id)
}

/// Apply the transition table. On a zone swap the exit is emitted before
/// the enter so audit trails stay consistent.
fn transition_events(
    device_id: &DeviceId,
    previous: Option<ZoneId>,
    new_zone: Option<ZoneId>,
) -> Vec<ZoneEvent> {
    match (previous, new_zone) {
        (None, Some(entered)) => vec![ZoneEvent::enter(device_id.clone(), entered)],
        (Some(left), None) => vec![ZoneEvent::exit(device_id.clone(), left)],
        (Some(left), Some(entered)) if left != entered => vec![
            ZoneEvent::exit(device_id.clone(), left),
            ZoneEvent::enter(device_id.clone(), entered),
        ],
        _ => Vec::new(),
    }
}
