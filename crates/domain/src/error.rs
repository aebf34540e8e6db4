//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`GeozoneError`]
//! via `#[from]` — no string-typed variants.

/// Top-level error for all geozone operations.
#[derive(Debug, thiserror::Error)]
pub enum GeozoneError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The storage adapter failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Zone name must be non-empty.
    #[error("zone name must not be empty")]
    EmptyName,

    /// Zone requires a center coordinate.
    #[error("zone center coordinate is required")]
    MissingCenter,

    /// Geofence radius must be a finite positive number of meters.
    #[error("zone radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    /// Latitude/longitude outside the valid range or not finite.
    #[error("invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates {
        /// Offending latitude in decimal degrees.
        latitude: f64,
        /// Offending longitude in decimal degrees.
        longitude: f64,
    },
}

/// A lookup by id that matched nothing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"Zone"`).
    pub entity: &'static str,
    /// Stringified identifier used for the lookup.
    pub id: String,
}
