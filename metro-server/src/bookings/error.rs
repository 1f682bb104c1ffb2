//! Booking error types.

/// Errors that can occur when recording or looking up bookings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// A required rider detail is blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// No booking has this identifier
    #[error("booking not found: {0}")]
    NotFound(String),

    /// Could not find an unused identifier
    #[error("no free booking identifier after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },
}
