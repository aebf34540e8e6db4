//! Zone service — use-cases for managing zones and their device memberships.

use geozone_domain::error::{GeozoneError, NotFoundError};
use geozone_domain::id::{DeviceId, ZoneId};
use geozone_domain::time::now;
use geozone_domain::zone::{Zone, ZonePatch};

use crate::ports::ZoneRepository;

/// Application service for zone CRUD and membership management.
pub struct ZoneService<R> {
    repo: R,
}

impl<R: ZoneRepository> ZoneService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new zone after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GeozoneError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    pub async fn create_zone(&self, zone: Zone) -> Result<Zone, GeozoneError> {
        zone.validate()?;
        let zone = self.repo.create(zone).await?;
        tracing::info!(zone = %zone.id, name = %zone.name, "zone created");
        Ok(zone)
    }

    /// Look up a zone by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`GeozoneError::NotFound`] when no zone with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_zone(&self, id: ZoneId) -> Result<Zone, GeozoneError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Zone",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all zones in registry order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_zones(&self) -> Result<Vec<Zone>, GeozoneError> {
        self.repo.get_all().await
    }

    /// List zones currently participating in geofence checks.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_active_zones(&self) -> Result<Vec<Zone>, GeozoneError> {
        let zones = self.repo.get_all().await?;
        Ok(zones.into_iter().filter(|zone| zone.is_active).collect())
    }

    /// Merge `patch` into an existing zone and re-validate.
    ///
    /// `id` and `created_at` are immutable; `updated_at` is bumped.
    ///
    /// # Errors
    ///
    /// Returns [`GeozoneError::NotFound`] if the zone does not exist,
    /// [`GeozoneError::Validation`] if the patched zone violates invariants
    /// (e.g. a non-positive radius), or a storage error.
    pub async fn update_zone(&self, id: ZoneId, patch: ZonePatch) -> Result<Zone, GeozoneError> {
        let mut zone = self.get_zone(id).await?;
        zone.apply(patch, now());
        zone.validate()?;
        self.repo.update(zone).await
    }

    /// Delete a zone, reporting whether it existed.
    ///
    /// Device memberships disappear with the zone; devices that belonged to
    /// it are simply re-evaluated against the remaining zones on their next
    /// location sample.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn delete_zone(&self, id: ZoneId) -> Result<bool, GeozoneError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!(zone = %id, "zone deleted");
        }
        Ok(deleted)
    }

    /// Declare a device as a member of a zone. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`GeozoneError::NotFound`] if the zone does not exist, or a
    /// storage error from the repository.
    pub async fn add_device_to_zone(
        &self,
        zone_id: ZoneId,
        device_id: DeviceId,
    ) -> Result<Zone, GeozoneError> {
        let mut zone = self.get_zone(zone_id).await?;
        if zone.add_member(device_id, now()) {
            return self.repo.update(zone).await;
        }
        Ok(zone)
    }

    /// Remove a device from a zone's member set. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`GeozoneError::NotFound`] if the zone does not exist, or a
    /// storage error from the repository.
    pub async fn remove_device_from_zone(
        &self,
        zone_id: ZoneId,
        device_id: &DeviceId,
    ) -> Result<Zone, GeozoneError> {
        let mut zone = self.get_zone(zone_id).await?;
        if zone.remove_member(device_id, now()) {
            return self.repo.update(zone).await;
        }
        Ok(zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geozone_domain::error::ValidationError;
    use geozone_domain::geo::GeoPoint;
    use geozone_domain::zone::ZoneKind;
    use std::future::Future;
    use std::sync::Mutex;

    struct InMemoryZoneRepo {
        store: Mutex<Vec<Zone>>,
    }

    impl Default for InMemoryZoneRepo {
        fn default() -> Self {
            Self {
                store: Mutex::new(Vec::new()),
            }
        }
    }

    impl ZoneRepository for InMemoryZoneRepo {
        fn create(&self, zone: Zone) -> impl Future<Output = Result<Zone, GeozoneError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.push(zone.clone());
            async { Ok(zone) }
        }

        fn get_by_id(
            &self,
            id: ZoneId,
        ) -> impl Future<Output = Result<Option<Zone>, GeozoneError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.iter().find(|zone| zone.id == id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Zone>, GeozoneError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.clone();
            async { Ok(result) }
        }

        fn update(&self, zone: Zone) -> impl Future<Output = Result<Zone, GeozoneError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = match store.iter_mut().find(|existing| existing.id == zone.id) {
                Some(existing) => {
                    *existing = zone.clone();
                    Ok(zone)
                }
                None => Err(NotFoundError {
                    entity: "Zone",
                    id: zone.id.to_string(),
                }
                .into()),
            };
            async { result }
        }

        fn delete(&self, id: ZoneId) -> impl Future<Output = Result<bool, GeozoneError>> + Send {
            let mut store = self.store.lock().unwrap();
            let before = store.len();
            store.retain(|zone| zone.id != id);
            let deleted = store.len() < before;
            async move { Ok(deleted) }
        }
    }

    fn make_service() -> ZoneService<InMemoryZoneRepo> {
        ZoneService::new(InMemoryZoneRepo::default())
    }

    fn valid_zone(name: &str) -> Zone {
        Zone::builder()
            .name(name)
            .kind(ZoneKind::Home)
            .center(GeoPoint::new(37.7749, -122.4194))
            .radius_m(50.0)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_zone_when_valid() {
        let svc = make_service();
        let zone = valid_zone("Home");
        let id = zone.id;

        let created = svc.create_zone(zone).await.unwrap();
        assert_eq!(created.id, id);

        let fetched = svc.get_zone(id).await.unwrap();
        assert_eq!(fetched.name, "Home");
    }

    #[tokio::test]
    async fn should_reject_create_when_name_is_empty() {
        let svc = make_service();
        let mut zone = valid_zone("Home");
        zone.name = String::new();

        let result = svc.create_zone(zone).await;
        assert!(matches!(
            result,
            Err(GeozoneError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_zone_missing() {
        let svc = make_service();
        let result = svc.get_zone(ZoneId::new()).await;
        assert!(matches!(result, Err(GeozoneError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_zones_in_insertion_order() {
        let svc = make_service();
        let first = svc.create_zone(valid_zone("Home")).await.unwrap();
        let second = svc.create_zone(valid_zone("Office")).await.unwrap();

        let all = svc.list_zones().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }

    #[tokio::test]
    async fn should_filter_inactive_zones_from_active_listing() {
        let svc = make_service();
        svc.create_zone(valid_zone("Home")).await.unwrap();
        let office = svc.create_zone(valid_zone("Office")).await.unwrap();

        svc.update_zone(
            office.id,
            ZonePatch {
                is_active: Some(false),
                ..ZonePatch::default()
            },
        )
        .await
        .unwrap();

        let active = svc.list_active_zones().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Home");
        assert_eq!(svc.list_zones().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_update_zone_fields_and_bump_updated_at() {
        let svc = make_service();
        let zone = svc.create_zone(valid_zone("Home")).await.unwrap();

        let updated = svc
            .update_zone(
                zone.id,
                ZonePatch {
                    name: Some("Base".to_string()),
                    radius_m: Some(120.0),
                    ..ZonePatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Base");
        assert!((updated.radius_m - 120.0).abs() < f64::EPSILON);
        assert_eq!(updated.created_at, zone.created_at);
        assert!(updated.updated_at >= zone.updated_at);
    }

    #[tokio::test]
    async fn should_reject_update_with_non_positive_radius() {
        let svc = make_service();
        let zone = svc.create_zone(valid_zone("Home")).await.unwrap();

        let result = svc
            .update_zone(
                zone.id,
                ZonePatch {
                    radius_m: Some(0.0),
                    ..ZonePatch::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(GeozoneError::Validation(
                ValidationError::NonPositiveRadius(_)
            ))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_zone() {
        let svc = make_service();
        let result = svc.update_zone(ZoneId::new(), ZonePatch::default()).await;
        assert!(matches!(result, Err(GeozoneError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_report_delete_result() {
        let svc = make_service();
        let zone = svc.create_zone(valid_zone("Home")).await.unwrap();

        assert!(svc.delete_zone(zone.id).await.unwrap());
        assert!(!svc.delete_zone(zone.id).await.unwrap());
        assert!(matches!(
            svc.get_zone(zone.id).await,
            Err(GeozoneError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn should_add_device_to_zone_idempotently() {
        let svc = make_service();
        let zone = svc.create_zone(valid_zone("Home")).await.unwrap();
        let d1 = DeviceId::from("d1");

        svc.add_device_to_zone(zone.id, d1.clone()).await.unwrap();
        let again = svc.add_device_to_zone(zone.id, d1.clone()).await.unwrap();

        assert_eq!(again.member_device_ids.len(), 1);
        assert!(again.is_member(&d1));
    }

    #[tokio::test]
    async fn should_remove_device_from_zone_idempotently() {
        let svc = make_service();
        let zone = svc.create_zone(valid_zone("Home")).await.unwrap();
        let d1 = DeviceId::from("d1");
        svc.add_device_to_zone(zone.id, d1.clone()).await.unwrap();

        let removed = svc.remove_device_from_zone(zone.id, &d1).await.unwrap();
        assert!(!removed.is_member(&d1));

        // Removing an absent device is still a success.
        let again = svc.remove_device_from_zone(zone.id, &d1).await.unwrap();
        assert!(again.member_device_ids.is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_mutating_membership_of_missing_zone() {
        let svc = make_service();
        let result = svc
            .add_device_to_zone(ZoneId::new(), DeviceId::from("d1"))
            .await;
        assert!(matches!(result, Err(GeozoneError::NotFound(_))));
    }
}
