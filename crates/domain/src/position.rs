//! Device position — last known location and zone membership of a device.

use crate::geo::GeoPoint;
use crate::id::{DeviceId, ZoneId};

/// Engine-internal record of where a device last was.
///
/// Created on the first location sample for a device and rewritten on every
/// subsequent sample. Positions live in process memory only; stale devices
/// simply stop receiving updates.
#[derive(Debug, Clone, PartialEq)]
pub struct DevicePosition {
    pub device_id: DeviceId,
    pub point: GeoPoint,
    /// Zone the device was last determined to be inside, if any.
    pub current_zone_id: Option<ZoneId>,
}

impl DevicePosition {
    /// Record an initial position with no zone membership.
    #[must_use]
    pub fn new(device_id: DeviceId, point: GeoPoint) -> Self {
        Self {
            device_id,
            point,
            current_zone_id: None,
        }
    }
}
