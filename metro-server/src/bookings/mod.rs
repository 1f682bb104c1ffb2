//! Ticket bookings.
//!
//! Records rider ticket requests against a priced journey. Bookings live in
//! memory for the lifetime of the process.

mod booking;
mod error;
mod recorder;

pub use booking::{Booking, BookingId, RiderDetails};
pub use error::BookingError;
pub use recorder::BookingRecorder;
