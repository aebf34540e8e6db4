//! # geozone-adapter-simulator
//!
//! Scripted location source for demos and end-to-end tests.
//!
//! A [`RouteSimulator`] walks a device along a cyclic list of waypoints at a
//! fixed step length. It is deliberately deterministic (no randomness) so a
//! demo run or a test produces the same event sequence every time.
//!
//! The simulator owns no timer: whoever drives it (the daemon, a test) calls
//! [`RouteSimulator::step`] at its own pace and feeds the returned point into
//! the geofence engine. The engine never learns the simulator exists.
//!
//! ## Dependency rule
//!
//! Depends on `geozone-domain` only.

use geozone_domain::geo::GeoPoint;
use geozone_domain::id::DeviceId;

/// Errors raised when constructing a simulator.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    /// A route needs at least one waypoint.
    #[error("route must contain at least one waypoint")]
    EmptyRoute,

    /// Step length must be a finite positive number of meters.
    #[error("step length must be positive, got {0}")]
    NonPositiveStep(f64),
}

/// Deterministic waypoint walker for a single simulated device.
#[derive(Debug)]
pub struct RouteSimulator {
    device_id: DeviceId,
    waypoints: Vec<GeoPoint>,
    step_m: f64,
    current: GeoPoint,
    target: usize,
}

impl RouteSimulator {
    /// Create a simulator starting at the first waypoint and heading toward
    /// the second (routes cycle, so a single waypoint means standing still).
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::EmptyRoute`] for an empty waypoint list or
    /// [`SimulatorError::NonPositiveStep`] for a non-positive step length.
    pub fn new(
        device_id: DeviceId,
        waypoints: Vec<GeoPoint>,
        step_m: f64,
    ) -> Result<Self, SimulatorError> {
        let Some(&start) = waypoints.first() else {
            return Err(SimulatorError::EmptyRoute);
        };
        if !step_m.is_finite() || step_m <= 0.0 {
            return Err(SimulatorError::NonPositiveStep(step_m));
        }
        let target = if waypoints.len() > 1 { 1 } else { 0 };
        Ok(Self {
            device_id,
            waypoints,
            step_m,
            current: start,
            target,
        })
    }

    /// Identifier of the simulated device.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    /// Current position without advancing.
    #[must_use]
    pub fn position(&self) -> GeoPoint {
        self.current
    }

    /// Advance one step toward the current target waypoint and return the
    /// new position. Arriving at a waypoint snaps onto it and retargets the
    /// next one in the cycle.
    pub fn step(&mut self) -> GeoPoint {
        let target = self.waypoints[self.target];
        let remaining = self.current.distance_m(target);
        if remaining <= self.step_m {
            self.current = target;
            self.target = (self.target + 1) % self.waypoints.len();
        } else {
            // Interpolating in degrees is fine at step-length scale; the
            // engine only cares about the resulting Haversine distance.
            let fraction = self.step_m / remaining;
            self.current = GeoPoint::new(
                self.current.latitude + (target.latitude - self.current.latitude) * fraction,
                self.current.longitude + (target.longitude - self.current.longitude) * fraction,
            );
        }
        self.current
    }
}
