//! Web layer for the metro journey planner.
//!
//! Provides JSON endpoints for routes, fares and bookings.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
