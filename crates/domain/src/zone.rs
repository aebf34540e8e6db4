//! Zone — a named circular geofence with an associated set of devices.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{GeozoneError, ValidationError};
use crate::geo::GeoPoint;
use crate::id::{DeviceId, ZoneId};
use crate::time::Timestamp;

/// Descriptive category of a zone. Has no effect on geofence math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Home,
    Office,
    School,
    Safe,
    NoAlert,
    #[default]
    Custom,
}

/// A circular geofence.
///
/// Only devices listed in `member_device_ids` are checked against this zone,
/// and only while `is_active` is set. Deactivating a zone keeps its member
/// set so it can be reactivated later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub kind: ZoneKind,
    pub center: GeoPoint,
    /// Geofence radius in meters, strictly positive.
    pub radius_m: f64,
    pub is_active: bool,
    pub member_device_ids: HashSet<DeviceId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Zone {
    /// Create a builder for constructing a [`Zone`].
    #[must_use]
    pub fn builder() -> ZoneBuilder {
        ZoneBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GeozoneError::Validation`] when `name` is empty, `radius_m`
    /// is not a finite positive number, or `center` is out of range.
    pub fn validate(&self) -> Result<(), GeozoneError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(ValidationError::NonPositiveRadius(self.radius_m).into());
        }
        self.center.validate()?;
        Ok(())
    }

    /// Whether `point` lies on or inside the geofence boundary.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.center.distance_m(point) <= self.radius_m
    }

    /// Whether `device_id` is declared as a member of this zone.
    #[must_use]
    pub fn is_member(&self, device_id: &DeviceId) -> bool {
        self.member_device_ids.contains(device_id)
    }

    /// Add a device to the member set. Idempotent; returns whether the set
    /// changed. Any change bumps `updated_at`.
    pub fn add_member(&mut self, device_id: DeviceId, now: Timestamp) -> bool {
        let inserted = self.member_device_ids.insert(device_id);
        if inserted {
            self.updated_at = now;
        }
        inserted
    }

    /// Remove a device from the member set. Idempotent; returns whether the
    /// set changed. Any change bumps `updated_at`.
    pub fn remove_member(&mut self, device_id: &DeviceId, now: Timestamp) -> bool {
        let removed = self.member_device_ids.remove(device_id);
        if removed {
            self.updated_at = now;
        }
        removed
    }

    /// Merge the provided fields into this zone and bump `updated_at`.
    ///
    /// `id` and `created_at` are never touched; callers re-validate after
    /// applying a patch.
    pub fn apply(&mut self, patch: ZonePatch, now: Timestamp) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(center) = patch.center {
            self.center = center;
        }
        if let Some(radius_m) = patch.radius_m {
            self.radius_m = radius_m;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
    }
}

/// Partial update for [`Zone`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZonePatch {
    pub name: Option<String>,
    pub kind: Option<ZoneKind>,
    pub center: Option<GeoPoint>,
    pub radius_m: Option<f64>,
    pub is_active: Option<bool>,
}

/// Step-by-step builder for [`Zone`].
#[derive(Debug, Default)]
pub struct ZoneBuilder {
    name: Option<String>,
    kind: ZoneKind,
    center: Option<GeoPoint>,
    radius_m: Option<f64>,
    is_active: Option<bool>,
    member_device_ids: HashSet<DeviceId>,
}

impl ZoneBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: ZoneKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn center(mut self, center: GeoPoint) -> Self {
        self.center = Some(center);
        self
    }

    #[must_use]
    pub fn radius_m(mut self, radius_m: f64) -> Self {
        self.radius_m = Some(radius_m);
        self
    }

    #[must_use]
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    #[must_use]
    pub fn member(mut self, device_id: impl Into<DeviceId>) -> Self {
        self.member_device_ids.insert(device_id.into());
        self
    }

    /// Consume the builder, assign a fresh id and timestamps, validate, and
    /// return a [`Zone`].
    ///
    /// # Errors
    ///
    /// Returns [`GeozoneError::Validation`] if `name` is missing or empty,
    /// `center` is missing or out of range, or `radius_m` is missing or not
    /// a finite positive number.
    pub fn build(self) -> Result<Zone, GeozoneError> {
        let center = self.center.ok_or(ValidationError::MissingCenter)?;
        let ts = crate::time::now();
        let zone = Zone {
            id: ZoneId::new(),
            name: self.name.unwrap_or_default(),
            kind: self.kind,
            center,
            radius_m: self.radius_m.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(true),
            member_device_ids: self.member_device_ids,
            created_at: ts,
            updated_at: ts,
        };
        zone.validate()?;
        Ok(zone)
    }
}
