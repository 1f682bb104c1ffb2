//! Route planner configuration.

use super::fare::FareError;

/// Fare formula parameters.
///
/// A fare is `base_fare + per_unit_charge * distance_km`, rounded to
/// `display_precision` decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareConfig {
    base_fare: f64,
    per_unit_charge: f64,
    display_precision: u32,
}

impl FareConfig {
    /// Largest supported number of decimal places.
    pub const MAX_PRECISION: u32 = 9;

    /// Create a fare configuration.
    ///
    /// Both charges must be finite and non-negative.
    pub fn new(
        base_fare: f64,
        per_unit_charge: f64,
        display_precision: u32,
    ) -> Result<Self, FareError> {
        if !base_fare.is_finite() || base_fare < 0.0 {
            return Err(FareError::InvalidConfig("base fare must be finite and non-negative"));
        }
        if !per_unit_charge.is_finite() || per_unit_charge < 0.0 {
            return Err(FareError::InvalidConfig(
                "per-unit charge must be finite and non-negative",
            ));
        }
        if display_precision > Self::MAX_PRECISION {
            return Err(FareError::InvalidConfig("display precision must be at most 9"));
        }
        Ok(Self {
            base_fare,
            per_unit_charge,
            display_precision,
        })
    }

    /// Flat minimum charge.
    pub fn base_fare(&self) -> f64 {
        self.base_fare
    }

    /// Marginal charge per kilometre.
    pub fn per_unit_charge(&self) -> f64 {
        self.per_unit_charge
    }

    /// Number of decimal places fares are rounded to.
    pub fn display_precision(&self) -> u32 {
        self.display_precision
    }
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            base_fare: 10.0,
            per_unit_charge: 2.0,
            display_precision: 2,
        }
    }
}

/// Configuration for the route planner.
#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    /// Fare formula.
    pub fare: FareConfig,

    /// Maximum number of stations the search may settle before giving up.
    /// `None` means no limit.
    pub max_expansions: Option<usize>,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(fare: FareConfig, max_expansions: Option<usize>) -> Self {
        Self {
            fare,
            max_expansions,
        }
    }
}
