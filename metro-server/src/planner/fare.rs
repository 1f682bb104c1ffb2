//! Distance-based fares.

use serde::Serialize;

use super::config::FareConfig;

/// Error from fare calculation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FareError {
    /// Distance is negative or not finite
    #[error("invalid distance: {0} km")]
    InvalidDistance(f64),

    /// Fare parameters are unusable
    #[error("invalid fare configuration: {0}")]
    InvalidConfig(&'static str),
}

/// A fare for travelling a given distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FareQuote {
    distance_km: f64,
    amount: f64,
}

impl FareQuote {
    /// The distance this fare was computed for.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// The fare, rounded to the configured precision.
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// Compute the fare for a distance.
///
/// Fails on negative or non-finite distances rather than clamping them.
pub fn calculate_fare(config: &FareConfig, distance_km: f64) -> Result<FareQuote, FareError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(FareError::InvalidDistance(distance_km));
    }

    let raw = config.base_fare() + config.per_unit_charge() * distance_km;

    Ok(FareQuote {
        distance_km,
        amount: round_to(raw, config.display_precision()),
    })
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
