//! # geozone-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ZoneRepository` — CRUD for zones, insertion-ordered listing
//!   - `EventPublisher` — fan-out for zone events
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ZoneService` — zone CRUD and device membership
//!   - `GeofenceEngine` — ingest location samples, detect transitions
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* storage or IO works
//!
//! ## Dependency rule
//! Depends on `geozone-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod geofence_engine;
pub mod ports;
pub mod services;
