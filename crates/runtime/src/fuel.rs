//! Shared knowledge of the fuel resource's location.
use std::sync::OnceLock;

use tileworld_core::Coordinate;

/// Process-wide record of where the fuel resource is.
///
/// The record is written at most once, by whichever agent senses the fuel
/// resource first; every other access is a read. Agents share it through an
/// `Arc`.
#[derive(Debug, Default)]
pub struct FuelRecord {
    location: OnceLock<Coordinate>,
}

impl FuelRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record whose location is already known.
    pub fn known(location: Coordinate) -> Self {
        let record = Self::new();
        record.record(location);
        record
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location.get().copied()
    }

    pub fn is_known(&self) -> bool {
        self.location.get().is_some()
    }

    /// Publishes a sighting. Returns `true` only for the first discovery.
    pub fn record(&self, location: Coordinate) -> bool {
        let discovered = self.location.set(location).is_ok();
        if discovered {
            tracing::info!("fuel resource discovered at {}", location);
        }
        discovered
    }
}
