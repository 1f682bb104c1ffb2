//! Transit network model.
//!
//! Holds the fixed set of stations and the undirected, distance-weighted
//! connections between them. The network is built once at startup, either
//! from a JSON edge list or from the built-in Red Line, and never changes
//! afterwards.

mod error;
mod file;
mod model;
mod reference;

pub use error::NetworkError;
pub use file::{EdgeRecord, NetworkFile, NetworkFileError, StationRecord, load_network};
pub use model::{NetworkBuilder, NetworkModel};
pub(crate) use model::StationId;
pub use reference::{RED_LINE_JSON, red_line};
