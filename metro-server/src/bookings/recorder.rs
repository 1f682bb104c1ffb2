//! In-memory booking store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rand::Rng;
use tokio::sync::RwLock;
use tracing::info;

use crate::planner::Journey;

use super::booking::{Booking, BookingId, RiderDetails, ticket_code};
use super::error::BookingError;

/// How many random identifiers to try before giving up.
const MAX_ID_ATTEMPTS: usize = 32;

type IdSource = Arc<dyn Fn() -> u32 + Send + Sync>;

#[derive(Default)]
struct Store {
    /// Booking ids in the order they were recorded.
    order: Vec<BookingId>,
    by_id: HashMap<BookingId, Booking>,
}

/// Thread-safe booking recorder.
///
/// Keeps every booking for the lifetime of the process, keyed by a random
/// `METRO#####` identifier.
#[derive(Clone)]
pub struct BookingRecorder {
    inner: Arc<RwLock<Store>>,
    next_id: IdSource,
}

impl BookingRecorder {
    /// Create an empty recorder with random identifiers.
    pub fn new() -> Self {
        Self::with_id_source(|| rand::rng().random_range(BookingId::MIN..=BookingId::MAX))
    }

    /// Create an empty recorder drawing identifier numbers from `source`.
    pub fn with_id_source(source: impl Fn() -> u32 + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Store::default())),
            next_id: Arc::new(source),
        }
    }

    /// Record a booking for a priced journey.
    pub async fn record(
        &self,
        rider: RiderDetails,
        journey: &Journey,
        journey_date: NaiveDate,
    ) -> Result<Booking, BookingError> {
        let mut guard = self.inner.write().await;

        let booking_id = (0..MAX_ID_ATTEMPTS)
            .filter_map(|_| BookingId::from_number((self.next_id)()))
            .find(|id| !guard.by_id.contains_key(id))
            .ok_or(BookingError::IdSpaceExhausted {
                attempts: MAX_ID_ATTEMPTS,
            })?;

        let source = journey.route.origin().clone();
        let destination = journey.route.destination().clone();
        let booking = Booking {
            ticket_code: ticket_code(&booking_id, &source, &destination, journey_date),
            booking_id: booking_id.clone(),
            name: rider.name().to_string(),
            email: rider.email().to_string(),
            phone: rider.phone().to_string(),
            source,
            destination,
            fare: journey.fare.amount(),
            distance_km: journey.route.total_distance_km(),
            journey_date,
            created_at: Utc::now(),
        };

        guard.order.push(booking_id.clone());
        guard.by_id.insert(booking_id, booking.clone());

        info!(
            booking_id = %booking.booking_id,
            source = %booking.source,
            destination = %booking.destination,
            fare = booking.fare,
            "Booking recorded"
        );

        Ok(booking)
    }

    /// Look up a booking by identifier.
    pub async fn get(&self, id: &str) -> Result<Booking, BookingError> {
        let guard = self.inner.read().await;
        guard
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    /// All bookings, oldest first.
    pub async fn history(&self) -> Vec<Booking> {
        let guard = self.inner.read().await;
        guard
            .order
            .iter()
            .filter_map(|id| guard.by_id.get(id).cloned())
            .collect()
    }

    /// Get the number of recorded bookings.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.order.len()
    }

    /// Check if no bookings have been recorded.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.order.is_empty()
    }
}

impl Default for BookingRecorder {
    fn default() -> Self {
        Self::new()
    }
}
