//! The weighted station graph.

use std::collections::{HashMap, HashSet};

use crate::domain::{Coordinates, StationName};

use super::error::NetworkError;

/// Dense index of a station within a [`NetworkModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct StationId(pub(crate) usize);

/// A direct connection out of a station.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Edge {
    pub(crate) to: StationId,
    pub(crate) distance_km: f64,
}

#[derive(Debug, Clone)]
struct StationEntry {
    name: StationName,
    coordinates: Option<Coordinates>,
    edges: Vec<Edge>,
    /// Position of this station when all stations are sorted by name.
    name_rank: usize,
}

/// An immutable, undirected, positively weighted transit network.
///
/// Built once through [`NetworkBuilder`] and read-only afterwards, so a
/// single model can be shared between any number of concurrent queries.
///
/// Invariants upheld by construction:
/// - every edge is stored in both directions with the same weight
/// - every weight is finite and strictly positive
/// - there are no self-loops and no duplicate edges
/// - every station lies on at least one edge
#[derive(Debug, Clone)]
pub struct NetworkModel {
    name: Option<String>,
    stations: Vec<StationEntry>,
    index: HashMap<StationName, StationId>,
    edge_count: usize,
}

impl NetworkModel {
    /// Human-readable network name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// All stations, in the order the edge list introduced them.
    pub fn list_stations(&self) -> Vec<&StationName> {
        self.stations.iter().map(|s| &s.name).collect()
    }

    /// Check whether a station is part of the network.
    pub fn has_station(&self, station: &str) -> bool {
        self.index.contains_key(station)
    }

    /// Direct neighbours of a station and the distance to each.
    pub fn neighbors(&self, station: &str) -> Result<HashMap<&StationName, f64>, NetworkError> {
        let id = self.require(station)?;
        Ok(self.stations[id.0]
            .edges
            .iter()
            .map(|e| (&self.stations[e.to.0].name, e.distance_km))
            .collect())
    }

    /// Display coordinates of a station, if known.
    pub fn station_coordinates(&self, station: &str) -> Result<Option<Coordinates>, NetworkError> {
        let id = self.require(station)?;
        Ok(self.stations[id.0].coordinates)
    }

    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub(crate) fn station_id(&self, station: &str) -> Option<StationId> {
        self.index.get(station).copied()
    }

    pub(crate) fn require(&self, station: &str) -> Result<StationId, NetworkError> {
        self.station_id(station)
            .ok_or_else(|| NetworkError::UnknownStation(station.to_string()))
    }

    pub(crate) fn station_name(&self, id: StationId) -> &StationName {
        &self.stations[id.0].name
    }

    pub(crate) fn edges(&self, id: StationId) -> &[Edge] {
        &self.stations[id.0].edges
    }

    pub(crate) fn name_rank(&self, id: StationId) -> usize {
        self.stations[id.0].name_rank
    }
}

/// Builder for [`NetworkModel`].
///
/// Edges and coordinates are added fluently; the first problem encountered
/// is remembered and reported by [`build`](Self::build).
///
/// # Example
///
/// ```
/// use metro_server::network::NetworkBuilder;
///
/// let network = NetworkBuilder::new()
///     .add_edge("Shaheed Sthal", "Hindon River", 1.0)
///     .add_edge("Hindon River", "Arthala", 1.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(network.station_count(), 3);
/// assert!(network.has_station("Arthala"));
/// ```
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    name: Option<String>,
    stations: Vec<StationName>,
    index: HashMap<StationName, StationId>,
    edges: Vec<Vec<Edge>>,
    pairs: HashSet<(StationId, StationId)>,
    coordinates: Vec<(StationName, Coordinates)>,
    error: Option<NetworkError>,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the network's display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Connect two stations in both directions.
    pub fn add_edge(mut self, from: &str, to: &str, distance_km: f64) -> Self {
        if self.error.is_none()
            && let Err(e) = self.try_add_edge(from, to, distance_km)
        {
            self.error = Some(e);
        }
        self
    }

    /// Attach display coordinates to a station.
    ///
    /// The station must appear on some edge by the time the network is built.
    pub fn with_coordinates(mut self, station: &str, lat: f64, lon: f64) -> Self {
        if self.error.is_none()
            && let Err(e) = self.try_add_coordinates(station, lat, lon)
        {
            self.error = Some(e);
        }
        self
    }

    /// Build the network, reporting the first recorded problem.
    pub fn build(self) -> Result<NetworkModel, NetworkError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        if self.pairs.is_empty() {
            return Err(NetworkError::Empty);
        }

        let mut by_name: Vec<usize> = (0..self.stations.len()).collect();
        by_name.sort_by(|&a, &b| self.stations[a].cmp(&self.stations[b]));
        let mut name_rank = vec![0; self.stations.len()];
        for (rank, idx) in by_name.into_iter().enumerate() {
            name_rank[idx] = rank;
        }

        let mut stations: Vec<StationEntry> = self
            .stations
            .into_iter()
            .zip(self.edges)
            .zip(name_rank)
            .map(|((name, edges), name_rank)| StationEntry {
                name,
                coordinates: None,
                edges,
                name_rank,
            })
            .collect();

        for (station, coordinates) in self.coordinates {
            match self.index.get(&station) {
                Some(id) => stations[id.0].coordinates = Some(coordinates),
                None => return Err(NetworkError::CoordinatesForUnknownStation(station)),
            }
        }

        Ok(NetworkModel {
            name: self.name,
            stations,
            index: self.index,
            edge_count: self.pairs.len(),
        })
    }

    fn try_add_edge(&mut self, from: &str, to: &str, distance_km: f64) -> Result<(), NetworkError> {
        let from = StationName::parse(from)?;
        let to = StationName::parse(to)?;

        if from == to {
            return Err(NetworkError::SelfLoop(from));
        }
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(NetworkError::InvalidWeight {
                from,
                to,
                distance_km,
            });
        }

        let a = self.intern(&from);
        let b = self.intern(&to);
        if !self.pairs.insert((a.min(b), a.max(b))) {
            return Err(NetworkError::DuplicateEdge(from, to));
        }

        self.edges[a.0].push(Edge { to: b, distance_km });
        self.edges[b.0].push(Edge { to: a, distance_km });
        Ok(())
    }

    fn try_add_coordinates(&mut self, station: &str, lat: f64, lon: f64) -> Result<(), NetworkError> {
        let station = StationName::parse(station)?;
        let coordinates = Coordinates::new(lat, lon).map_err(|source| {
            NetworkError::InvalidCoordinates {
                station: station.clone(),
                source,
            }
        })?;
        self.coordinates.push((station, coordinates));
        Ok(())
    }

    fn intern(&mut self, name: &StationName) -> StationId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = StationId(self.stations.len());
        self.stations.push(name.clone());
        self.edges.push(Vec::new());
        self.index.insert(name.clone(), id);
        id
    }
}
