//! JSON edge-list format for network definitions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::NetworkError;
use super::model::{NetworkBuilder, NetworkModel};

/// Errors that can occur while loading a network file.
#[derive(Debug, thiserror::Error)]
pub enum NetworkFileError {
    /// File could not be read
    #[error("failed to read network file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File is not valid JSON for the expected shape
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File parsed but describes an invalid network
    #[error("invalid network: {0}")]
    Network(#[from] NetworkError),
}

/// A single undirected connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
}

/// Display coordinates for a station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// On-disk representation of a network.
///
/// ```json
/// {
///   "name": "Red Line",
///   "edges": [{ "from": "Shaheed Sthal", "to": "Hindon River", "distance_km": 1.0 }],
///   "stations": [{ "name": "Shaheed Sthal", "lat": 28.6725, "lon": 77.3718 }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub edges: Vec<EdgeRecord>,

    /// Coordinates only; stations themselves come from `edges`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stations: Vec<StationRecord>,
}

impl NetworkFile {
    /// Parse a network definition from JSON text.
    pub fn from_json(json: &str) -> Result<Self, NetworkFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a network definition from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetworkFileError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| NetworkFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::from_json(&contents)?;
        debug!(
            path = %path.display(),
            edges = file.edges.len(),
            "Read network file"
        );
        Ok(file)
    }

    /// Validate and build the network.
    pub fn into_model(self) -> Result<NetworkModel, NetworkError> {
        let mut builder = NetworkBuilder::new();
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        for edge in &self.edges {
            builder = builder.add_edge(&edge.from, &edge.to, edge.distance_km);
        }
        for station in &self.stations {
            builder = builder.with_coordinates(&station.name, station.lat, station.lon);
        }
        builder.build()
    }
}

/// Load and validate a network from a JSON file.
pub fn load_network(path: impl AsRef<Path>) -> Result<NetworkModel, NetworkFileError> {
    Ok(NetworkFile::load(path)?.into_model()?)
}
