//! Storage port — repository trait for the zone registry.

use std::future::Future;

use geozone_domain::error::GeozoneError;
use geozone_domain::id::ZoneId;
use geozone_domain::zone::Zone;

/// Repository for [`Zone`] records.
///
/// `get_all` must return zones in a stable registry order (insertion order
/// for in-memory implementations); the geofence engine resolves overlapping
/// zones by taking the first match in that order.
pub trait ZoneRepository {
    /// Store a newly created zone.
    fn create(&self, zone: Zone) -> impl Future<Output = Result<Zone, GeozoneError>> + Send;

    /// Fetch a zone by id, `None` when absent.
    fn get_by_id(
        &self,
        id: ZoneId,
    ) -> impl Future<Output = Result<Option<Zone>, GeozoneError>> + Send;

    /// List every zone in registry order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Zone>, GeozoneError>> + Send;

    /// Replace an existing zone.
    ///
    /// Fails with [`GeozoneError::NotFound`] when the zone does not exist.
    fn update(&self, zone: Zone) -> impl Future<Output = Result<Zone, GeozoneError>> + Send;

    /// Remove a zone, reporting whether it existed.
    fn delete(&self, id: ZoneId) -> impl Future<Output = Result<bool, GeozoneError>> + Send;
}
