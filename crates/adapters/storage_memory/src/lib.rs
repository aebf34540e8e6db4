//! # geozone-adapter-storage-memory
//!
//! In-memory implementation of the [`ZoneRepository`] port.
//!
//! The zone registry lives in process memory only and vanishes on restart;
//! there is no durable store behind it. Zones are kept in insertion order,
//! which is the registry order the geofence engine uses to resolve
//! overlapping zones.
//!
//! ## Dependency rule
//!
//! Depends on `geozone-app` (port traits) and `geozone-domain` only.
//!
//! [`ZoneRepository`]: geozone_app::ports::ZoneRepository

mod zone_repo;

pub use zone_repo::MemoryZoneRepository;
