//! Route planner.
//!
//! Answers "what is the shortest way from this station to that one, and
//! what does it cost?" over a fixed [`NetworkModel`](crate::network::NetworkModel).
//!
//! The search is a Dijkstra-style relaxation with a binary-heap frontier;
//! the fare is a linear function of the resulting distance.

mod config;
mod fare;
mod search;

#[cfg(test)]
mod search_tests;

pub use config::{FareConfig, PlannerConfig};
pub use fare::{FareError, FareQuote, calculate_fare};
pub use search::{Journey, PlannerError, Route, RoutePlanner, RouteResult};
