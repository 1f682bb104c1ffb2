//! Booking records.

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::StationName;

use super::error::BookingError;

/// Identifier of a booking, e.g. `METRO48213`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    pub const PREFIX: &'static str = "METRO";

    /// Smallest numeric suffix.
    pub const MIN: u32 = 10_000;

    /// Largest numeric suffix.
    pub const MAX: u32 = 99_999;

    /// Build an identifier from a five-digit number.
    pub fn from_number(n: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&n)
            .then(|| BookingId(format!("{}{n}", Self::PREFIX)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for BookingId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact details a rider supplies when booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiderDetails {
    name: String,
    email: String,
    phone: String,
}

impl RiderDetails {
    /// Validate rider details. All fields are required.
    pub fn new(name: &str, email: &str, phone: &str) -> Result<Self, BookingError> {
        Ok(Self {
            name: required("name", name)?,
            email: required("email", email)?,
            phone: required("phone", phone)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

fn required(field: &'static str, value: &str) -> Result<String, BookingError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BookingError::MissingField(field));
    }
    Ok(value.to_string())
}

/// A recorded ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: StationName,
    pub destination: StationName,
    pub fare: f64,
    pub distance_km: f64,
    pub journey_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Payload for the ticket's QR code.
    pub ticket_code: String,
}

/// Payload encoded on the ticket: id, endpoints and travel date.
pub(crate) fn ticket_code(
    id: &BookingId,
    source: &StationName,
    destination: &StationName,
    date: NaiveDate,
) -> String {
    format!("{id}|{source}|{destination}|{}", date.format("%Y-%m-%d"))
}
