//! Zone event — an immutable record of a device crossing a geofence.
//!
//! Events are produced by the geofence engine when a device's computed zone
//! membership changes between two consecutive location samples. The engine
//! does not retain them; subscribers buffer their own history if they need
//! one.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, EventId, ZoneId};
use crate::time::{Timestamp, now};

/// Direction of a geofence crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneEventKind {
    Enter,
    Exit,
}

/// A single enter/exit transition, timestamped at detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneEvent {
    pub id: EventId,
    pub kind: ZoneEventKind,
    pub device_id: DeviceId,
    pub zone_id: ZoneId,
    pub timestamp: Timestamp,
}

impl ZoneEvent {
    /// Record that `device_id` entered `zone_id`.
    #[must_use]
    pub fn enter(device_id: DeviceId, zone_id: ZoneId) -> Self {
        Self {
            id: EventId::new(),
            kind: ZoneEventKind::Enter,
            device_id,
            zone_id,
            timestamp: now(),
        }
    }

    /// Record that `device_id` left `zone_id`.
    #[must_use]
    pub fn exit(device_id: DeviceId, zone_id: ZoneId) -> Self {
        Self {
            id: EventId::new(),
            kind: ZoneEventKind::Exit,
            device_id,
            zone_id,
            timestamp: now(),
        }
    }
}
