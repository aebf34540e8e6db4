//! Use-case services exposed to driving adapters.

pub mod zone_service;

pub use zone_service::ZoneService;
