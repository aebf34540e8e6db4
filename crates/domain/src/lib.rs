//! # geozone-domain
//!
//! Pure domain model for the geozone geofencing engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Zones** (named circular geofences with a member-device set)
//! - Define **Device positions** (last known location + current zone)
//! - Define **Zone events** (enter/exit transition records)
//! - Great-circle distance math ([`geo`])
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod geo;
pub mod position;
pub mod zone;
