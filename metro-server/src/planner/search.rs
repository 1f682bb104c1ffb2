//! Shortest-path search over the station graph.
//!
//! A Dijkstra search with a binary-heap frontier. Relaxations push new
//! frontier entries instead of decreasing keys in place, so entries whose
//! distance is worse than the best known one are skipped when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::StationName;
use crate::network::{NetworkModel, StationId};

use super::config::PlannerConfig;
use super::fare::{FareError, FareQuote, calculate_fare};

/// Error from a route query.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    /// Source or destination is not on the network
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// The search settled more stations than the configured budget allows
    #[error("search budget exceeded after settling {settled} stations")]
    SearchBudgetExceeded { settled: usize },

    /// Fare could not be computed
    #[error(transparent)]
    Fare(#[from] FareError),
}

/// A path through the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    path: Vec<StationName>,
    total_distance_km: f64,
}

impl Route {
    /// Stations visited, source first and destination last.
    pub fn path(&self) -> &[StationName] {
        &self.path
    }

    /// Sum of the edge distances along the path.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// First station of the path.
    pub fn origin(&self) -> &StationName {
        // Paths always hold at least the source
        &self.path[0]
    }

    /// Last station of the path.
    pub fn destination(&self) -> &StationName {
        &self.path[self.path.len() - 1]
    }

    /// Number of hops between adjacent stations.
    pub fn hop_count(&self) -> usize {
        self.path.len() - 1
    }
}

/// Outcome of a shortest-path query.
///
/// `NoRoute` is an ordinary result: the network may legitimately be split
/// into disconnected parts.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteResult {
    Found(Route),
    NoRoute,
}

impl RouteResult {
    /// The route, if one exists.
    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteResult::Found(route) => Some(route),
            RouteResult::NoRoute => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            RouteResult::Found(route) => Some(route),
            RouteResult::NoRoute => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RouteResult::Found(_))
    }
}

/// A route together with its fare.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journey {
    pub route: Route,
    pub fare: FareQuote,
}

/// Frontier entry, ordered so that `BinaryHeap` pops the closest station.
///
/// Equal distances are broken by station name so that identical queries
/// always expand stations in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    distance: OrderedFloat<f64>,
    name_rank: usize,
    station: StationId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.name_rank.cmp(&self.name_rank))
            .then_with(|| other.station.cmp(&self.station))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Route planner over a fixed network.
///
/// Holds no state between queries; every call allocates its own working
/// set, so one network can serve concurrent planners.
pub struct RoutePlanner<'a> {
    network: &'a NetworkModel,
    config: &'a PlannerConfig,
}

impl<'a> RoutePlanner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a NetworkModel, config: &'a PlannerConfig) -> Self {
        Self { network, config }
    }

    /// The network this planner searches.
    pub fn network(&self) -> &NetworkModel {
        self.network
    }

    /// Find the minimum-distance path between two stations.
    ///
    /// Both stations are validated before any search work happens.
    pub fn find_shortest_path(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<RouteResult, PlannerError> {
        let source = self.lookup(source)?;
        let destination = self.lookup(destination)?;

        let n = self.network.station_count();
        let mut best = vec![f64::INFINITY; n];
        let mut predecessor: Vec<Option<StationId>> = vec![None; n];
        let mut frontier = BinaryHeap::new();
        let mut settled = 0;

        best[source.0] = 0.0;
        frontier.push(FrontierEntry {
            distance: OrderedFloat(0.0),
            name_rank: self.network.name_rank(source),
            station: source,
        });

        while let Some(FrontierEntry {
            distance, station, ..
        }) = frontier.pop()
        {
            let distance = distance.into_inner();
            if distance > best[station.0] {
                continue;
            }
            if station == destination {
                break;
            }

            settled += 1;
            if let Some(max) = self.config.max_expansions
                && settled > max
            {
                debug!(settled, max, "Search budget exceeded");
                return Err(PlannerError::SearchBudgetExceeded { settled });
            }

            trace!(
                station = %self.network.station_name(station),
                distance,
                "Settling station"
            );

            for edge in self.network.edges(station) {
                let candidate = distance + edge.distance_km;
                if candidate < best[edge.to.0] {
                    best[edge.to.0] = candidate;
                    predecessor[edge.to.0] = Some(station);
                    frontier.push(FrontierEntry {
                        distance: OrderedFloat(candidate),
                        name_rank: self.network.name_rank(edge.to),
                        station: edge.to,
                    });
                }
            }
        }

        let total_distance_km = best[destination.0];
        if total_distance_km.is_infinite() {
            debug!(
                source = %self.network.station_name(source),
                destination = %self.network.station_name(destination),
                settled,
                "No route"
            );
            return Ok(RouteResult::NoRoute);
        }

        let mut path = vec![self.network.station_name(destination).clone()];
        let mut current = destination;
        while let Some(prev) = predecessor[current.0] {
            path.push(self.network.station_name(prev).clone());
            current = prev;
        }
        path.reverse();

        debug!(
            source = %self.network.station_name(source),
            destination = %self.network.station_name(destination),
            stops = path.len(),
            distance_km = total_distance_km,
            settled,
            "Route found"
        );

        Ok(RouteResult::Found(Route {
            path,
            total_distance_km,
        }))
    }

    fn lookup(&self, station: &str) -> Result<StationId, PlannerError> {
        self.network
            .station_id(station)
            .ok_or_else(|| PlannerError::UnknownStation(station.to_string()))
    }

    /// Compute the fare for a distance using the configured formula.
    pub fn calculate_fare(&self, total_distance_km: f64) -> Result<FareQuote, FareError> {
        calculate_fare(&self.config.fare, total_distance_km)
    }

    /// Find the shortest path and price it.
    ///
    /// Returns `None` when the stations are not connected.
    pub fn plan_journey(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Option<Journey>, PlannerError> {
        let Some(route) = self.find_shortest_path(source, destination)?.into_route() else {
            return Ok(None);
        };
        let fare = self.calculate_fare(route.total_distance_km())?;
        Ok(Some(Journey { route, fare }))
    }
}
