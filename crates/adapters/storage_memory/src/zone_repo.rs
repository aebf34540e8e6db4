//! In-memory implementation of [`ZoneRepository`].

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

use geozone_app::ports::ZoneRepository;
use geozone_domain::error::{GeozoneError, NotFoundError};
use geozone_domain::id::ZoneId;
use geozone_domain::zone::Zone;

/// Insertion-ordered zone registry held in process memory.
///
/// Cloning yields another handle to the same registry, so the zone service
/// and the geofence engine can share one store. Every operation runs inside
/// a single lock; readers never observe a half-applied mutation.
#[derive(Clone, Default)]
pub struct MemoryZoneRepository {
    store: Arc<Mutex<Vec<Zone>>>,
}

impl MemoryZoneRepository {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ZoneRepository for MemoryZoneRepository {
    fn create(&self, zone: Zone) -> impl Future<Output = Result<Zone, GeozoneError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let mut zones = store.lock().await;
            zones.push(zone.clone());
            Ok(zone)
        }
    }

    fn get_by_id(
        &self,
        id: ZoneId,
    ) -> impl Future<Output = Result<Option<Zone>, GeozoneError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let zones = store.lock().await;
            Ok(zones.iter().find(|zone| zone.id == id).cloned())
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Zone>, GeozoneError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let zones = store.lock().await;
            Ok(zones.clone())
        }
    }

    fn update(&self, zone: Zone) -> impl Future<Output = Result<Zone, GeozoneError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let mut zones = store.lock().await;
            match zones.iter_mut().find(|existing| existing.id == zone.id) {
                Some(existing) => {
                    *existing = zone.clone();
                    Ok(zone)
                }
                None => Err(NotFoundError {
                    entity: "Zone",
                    id: zone.id.to_string(),
                }
                .into()),
            }
        }
    }

    fn delete(&self, id: ZoneId) -> impl Future<Output = Result<bool, GeozoneError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let mut zones = store.lock().await;
            let before = zones.len();
            zones.retain(|zone| zone.id != id);
            Ok(zones.len() < before)
        }
    }
}
