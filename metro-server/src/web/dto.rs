//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bookings::Booking;
use crate::network::NetworkModel;
use crate::planner::{FareQuote, Route};

/// A station in the station list.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Station name
    pub name: String,

    /// Latitude, if known
    pub lat: Option<f64>,

    /// Longitude, if known
    pub lon: Option<f64>,
}

/// Response listing every station.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Network name
    pub network: Option<String>,

    /// Stations in stable network order
    pub stations: Vec<StationResult>,
}

/// Query for a route between two stations.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Source station name
    pub from: String,

    /// Destination station name
    pub to: String,
}

/// A found route, or an explicit "no route" answer.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteResponse {
    Found {
        /// Stations from source to destination
        path: Vec<String>,

        /// Total distance in kilometres
        distance_km: f64,

        /// Fare for the route
        fare: f64,

        /// Number of station-to-station hops
        hops: usize,
    },
    NoRoute {
        from: String,
        to: String,
    },
}

/// Query for a fare.
#[derive(Debug, Deserialize)]
pub struct FareRequest {
    /// Distance in kilometres
    pub distance_km: f64,
}

/// Fare for a distance.
#[derive(Debug, Serialize)]
pub struct FareResponse {
    pub distance_km: f64,
    pub fare: f64,
}

/// Request to book a ticket.
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    /// Rider's full name
    pub name: String,

    /// Rider's email
    pub email: String,

    /// Rider's phone number
    pub phone: String,

    /// Source station name
    pub from: String,

    /// Destination station name
    pub to: String,

    /// Travel date, `YYYY-MM-DD`
    pub journey_date: NaiveDate,
}

/// Booking history.
#[derive(Debug, Serialize)]
pub struct BookingsResponse {
    /// Bookings, oldest first
    pub bookings: Vec<Booking>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StationsResponse {
    /// Create from the network model.
    pub fn from_network(network: &NetworkModel) -> Self {
        let stations = network
            .list_stations()
            .into_iter()
            .map(|station| {
                let coordinates = network
                    .station_coordinates(station.as_str())
                    .ok()
                    .flatten();
                StationResult {
                    name: station.to_string(),
                    lat: coordinates.map(|c| c.lat()),
                    lon: coordinates.map(|c| c.lon()),
                }
            })
            .collect();

        Self {
            network: network.name().map(str::to_string),
            stations,
        }
    }
}

impl RouteResponse {
    /// Create from a found route and its fare.
    pub fn from_route(route: &Route, fare: &FareQuote) -> Self {
        RouteResponse::Found {
            path: route.path().iter().map(|s| s.to_string()).collect(),
            distance_km: route.total_distance_km(),
            fare: fare.amount(),
            hops: route.hop_count(),
        }
    }
}

impl From<FareQuote> for FareResponse {
    fn from(quote: FareQuote) -> Self {
        Self {
            distance_km: quote.distance_km(),
            fare: quote.amount(),
        }
    }
}
