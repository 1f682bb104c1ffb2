//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::bookings::{BookingError, RiderDetails};
use crate::domain::StationName;
use crate::planner::{FareError, Journey, PlannerError, RouteResult};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/route", get(find_route))
        .route("/api/fare", get(quote_fare))
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/:id", get(get_booking))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every station with its coordinates.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    Json(StationsResponse::from_network(state.planner.network()))
}

/// Parse a station name from user input.
fn parse_station(field: &str, value: &str) -> Result<StationName, AppError> {
    StationName::parse(value).map_err(|e| AppError::BadRequest {
        message: format!("Invalid {field} station: {e}"),
    })
}

/// Find the shortest route between two stations and price it.
async fn find_route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let from = parse_station("source", &req.from)?;
    let to = parse_station("destination", &req.to)?;

    let result = state.planner.find_shortest_path(&from, &to).await?;

    let response = match result.route() {
        Some(route) => {
            let fare = state
                .planner
                .planner()
                .calculate_fare(route.total_distance_km())?;
            RouteResponse::from_route(route, &fare)
        }
        None => RouteResponse::NoRoute {
            from: from.to_string(),
            to: to.to_string(),
        },
    };

    Ok(Json(response))
}

/// Quote a fare for a distance.
async fn quote_fare(
    State(state): State<AppState>,
    Query(req): Query<FareRequest>,
) -> Result<Json<FareResponse>, AppError> {
    let quote = state.planner.planner().calculate_fare(req.distance_km)?;
    Ok(Json(quote.into()))
}

/// Book a ticket for the route between two stations.
///
/// The route and fare are recomputed from the requested endpoints.
async fn create_booking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: BookingRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid booking JSON");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let rider = RiderDetails::new(&req.name, &req.email, &req.phone)?;
    let from = parse_station("source", &req.from)?;
    let to = parse_station("destination", &req.to)?;

    let result = state.planner.find_shortest_path(&from, &to).await?;
    let RouteResult::Found(route) = result.as_ref() else {
        return Err(AppError::Unprocessable {
            message: format!("No route from {from} to {to}"),
        });
    };

    let fare = state
        .planner
        .planner()
        .calculate_fare(route.total_distance_km())?;
    let journey = Journey {
        route: route.clone(),
        fare,
    };

    let booking = state
        .bookings
        .record(rider, &journey, req.journey_date)
        .await?;

    Ok((StatusCode::CREATED, Json(booking)).into_response())
}

/// Booking history, oldest first.
async fn list_bookings(State(state): State<AppState>) -> Json<BookingsResponse> {
    Json(BookingsResponse {
        bookings: state.bookings.history().await,
    })
}

/// A single booking.
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let booking = state.bookings.get(&id).await?;
    Ok(Json(booking).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<PlannerError> for AppError {
    fn from(e: PlannerError) -> Self {
        match e {
            PlannerError::UnknownStation(_) => AppError::NotFound {
                message: e.to_string(),
            },
            PlannerError::Fare(fare) => fare.into(),
            PlannerError::SearchBudgetExceeded { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<FareError> for AppError {
    fn from(e: FareError) -> Self {
        match e {
            FareError::InvalidDistance(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            FareError::InvalidConfig(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::MissingField(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            BookingError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            BookingError::IdSpaceExhausted { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
