//! Process configuration from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::RouteCacheConfig;
use crate::planner::{FareConfig, FareError, PlannerConfig};

/// Default listen address.
const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);

/// Error from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// Fare parameters are out of range
    #[error(transparent)]
    Fare(#[from] FareError),
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// Network definition file. The built-in Red Line is used when unset.
    pub network_file: Option<PathBuf>,

    /// Route planner settings.
    pub planner: PlannerConfig,

    /// Route cache settings.
    pub route_cache: RouteCacheConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable                     | Default          |
    /// |------------------------------|------------------|
    /// | `METRO_BIND_ADDR`            | `127.0.0.1:3000` |
    /// | `METRO_NETWORK_FILE`         | built-in network |
    /// | `METRO_BASE_FARE`            | `10`             |
    /// | `METRO_PER_KM_CHARGE`        | `2`              |
    /// | `METRO_FARE_PRECISION`       | `2`              |
    /// | `METRO_MAX_EXPANSIONS`       | unlimited        |
    /// | `METRO_ROUTE_CACHE_CAPACITY` | `1000`           |
    /// | `METRO_ROUTE_CACHE_TTL_SECS` | `3600`           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_or("METRO_BIND_ADDR", get("METRO_BIND_ADDR"), DEFAULT_BIND_ADDR)?;

        let network_file = get("METRO_NETWORK_FILE").map(PathBuf::from);

        let default_fare = FareConfig::default();
        let fare = FareConfig::new(
            parse_or(
                "METRO_BASE_FARE",
                get("METRO_BASE_FARE"),
                default_fare.base_fare(),
            )?,
            parse_or(
                "METRO_PER_KM_CHARGE",
                get("METRO_PER_KM_CHARGE"),
                default_fare.per_unit_charge(),
            )?,
            parse_or(
                "METRO_FARE_PRECISION",
                get("METRO_FARE_PRECISION"),
                default_fare.display_precision(),
            )?,
        )?;

        let max_expansions = get("METRO_MAX_EXPANSIONS")
            .map(|v| parse("METRO_MAX_EXPANSIONS", v))
            .transpose()?;

        let default_cache = RouteCacheConfig::default();
        let route_cache = RouteCacheConfig {
            max_capacity: parse_or(
                "METRO_ROUTE_CACHE_CAPACITY",
                get("METRO_ROUTE_CACHE_CAPACITY"),
                default_cache.max_capacity,
            )?,
            ttl: Duration::from_secs(parse_or(
                "METRO_ROUTE_CACHE_TTL_SECS",
                get("METRO_ROUTE_CACHE_TTL_SECS"),
                default_cache.ttl.as_secs(),
            )?),
        };

        Ok(Self {
            bind_addr,
            network_file,
            planner: PlannerConfig::new(fare, max_expansions),
            route_cache,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) => parse(key, v),
        None => Ok(default),
    }
}
