//! # geozoned — geozone demo daemon
//!
//! Composition root that wires the adapters together and drives a simulated
//! device through a couple of demo zones.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Construct the in-memory zone repository and event bus
//! - Construct application services and the geofence engine
//! - Seed demo zones and a tracked device
//! - Feed simulator samples into the engine on a timer and log the events
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use geozone_adapter_simulator::RouteSimulator;
use geozone_adapter_storage_memory::MemoryZoneRepository;
use geozone_app::event_bus::InProcessEventBus;
use geozone_app::geofence_engine::GeofenceEngine;
use geozone_app::services::ZoneService;
use geozone_domain::geo::GeoPoint;
use geozone_domain::id::DeviceId;
use geozone_domain::zone::{Zone, ZoneKind};

use config::Config;

const HOME: GeoPoint = GeoPoint {
    latitude: 37.7749,
    longitude: -122.4194,
};
const OFFICE: GeoPoint = GeoPoint {
    latitude: 37.7955,
    longitude: -122.3937,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Registry, bus, services
    let repo = MemoryZoneRepository::new();
    let bus = Arc::new(InProcessEventBus::new(256));
    let zones = ZoneService::new(repo.clone());
    let engine = GeofenceEngine::new(repo, Arc::clone(&bus));

    // Demo registry: two zones with one tracked device walking between them.
    let tracker = DeviceId::from("demo-tracker");
    let home = zones
        .create_zone(
            Zone::builder()
                .name("Home")
                .kind(ZoneKind::Home)
                .center(HOME)
                .radius_m(150.0)
                .build()?,
        )
        .await?;
    let office = zones
        .create_zone(
            Zone::builder()
                .name("Office")
                .kind(ZoneKind::Office)
                .center(OFFICE)
                .radius_m(150.0)
                .build()?,
        )
        .await?;
    zones.add_device_to_zone(home.id, tracker.clone()).await?;
    zones.add_device_to_zone(office.id, tracker.clone()).await?;

    // Notification sink: log every zone event as it arrives.
    let mut events = bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::info!(
                device = %event.device_id,
                zone = %event.zone_id,
                kind = ?event.kind,
                at = %event.timestamp,
                "zone event"
            );
        }
    });

    let mut simulator = RouteSimulator::new(tracker, vec![HOME, OFFICE], config.simulation.step_m)?;
    let mut ticker = tokio::time::interval(Duration::from_millis(config.simulation.tick_ms));

    tracing::info!(
        tick_ms = config.simulation.tick_ms,
        step_m = config.simulation.step_m,
        "geozoned running; press Ctrl-C to stop"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let point = simulator.step();
                let device = simulator.device_id().clone();
                engine
                    .ingest_location(device, point.latitude, point.longitude)
                    .await?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::info!("shutting down");
    Ok(())
}
