//! Network construction and lookup errors.

use crate::domain::{InvalidCoordinates, InvalidStationName, StationName};

/// Errors raised while building or querying a [`NetworkModel`](super::NetworkModel).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    /// Station is not part of the network
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Station name failed validation
    #[error(transparent)]
    InvalidStation(#[from] InvalidStationName),

    /// Edge weight is zero, negative or not finite
    #[error("invalid distance {distance_km} km between {from} and {to}")]
    InvalidWeight {
        from: StationName,
        to: StationName,
        distance_km: f64,
    },

    /// Edge connects a station to itself
    #[error("station {0} cannot be connected to itself")]
    SelfLoop(StationName),

    /// The same pair of stations is connected twice
    #[error("duplicate edge between {0} and {1}")]
    DuplicateEdge(StationName, StationName),

    /// Coordinates supplied for a station with no edges
    #[error("coordinates given for station {0} which has no edges")]
    CoordinatesForUnknownStation(StationName),

    /// Coordinates out of range
    #[error("station {station}: {source}")]
    InvalidCoordinates {
        station: StationName,
        source: InvalidCoordinates,
    },

    /// No edges were supplied
    #[error("network must have at least one edge")]
    Empty,
}
