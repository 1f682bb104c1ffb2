//! Domain types for the metro journey planner.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod coordinates;
mod station;

pub use coordinates::{Coordinates, InvalidCoordinates};
pub use station::{InvalidStationName, StationName};
