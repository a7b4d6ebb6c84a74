//! Configurable clock-event rounding.
//!
//! Rounding is applied only to the wall-clock display fields
//! (`scheduled_start_time`/`scheduled_end_time`); raw clock instants stay
//! unrounded so duration math remains exact.

use crate::config::Config;
use chrono::{DateTime, TimeZone, Utc};

pub const DEFAULT_GRANULARITY_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMethod {
    Floor,
    Ceil,
    Nearest,
}

impl RoundingMethod {
    /// Lenient config parsing: anything unrecognized means Nearest.
    pub fn from_config_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "floor" | "down" => RoundingMethod::Floor,
            "ceil" | "ceiling" | "up" => RoundingMethod::Ceil,
            _ => RoundingMethod::Nearest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMethod::Floor => "floor",
            RoundingMethod::Ceil => "ceil",
            RoundingMethod::Nearest => "nearest",
        }
    }
}

/// Round an instant to a multiple of `granularity_minutes`.
///
/// Works on the epoch-millisecond count: floor, ceil, or round-to-nearest
/// (ties round up) on the unit count. A non-positive granularity falls back
/// to 15 minutes.
pub fn round_instant(
    instant: DateTime<Utc>,
    method: RoundingMethod,
    granularity_minutes: i64,
) -> DateTime<Utc> {
    let granularity = if granularity_minutes <= 0 {
        DEFAULT_GRANULARITY_MINUTES
    } else {
        granularity_minutes
    };
    let unit = granularity * 60_000;

    let ms = instant.timestamp_millis();
    let floor = ms.div_euclid(unit) * unit;
    let rem = ms.rem_euclid(unit);

    let rounded = match method {
        RoundingMethod::Floor => floor,
        RoundingMethod::Ceil => {
            if rem == 0 {
                floor
            } else {
                floor + unit
            }
        }
        RoundingMethod::Nearest => {
            if rem * 2 >= unit {
                floor + unit
            } else {
                floor
            }
        }
    };

    Utc.timestamp_millis_opt(rounded).single().unwrap_or(instant)
}

/// Store rounding policy as read from the config.
#[derive(Debug, Clone, Copy)]
pub struct Rounding {
    pub enabled: bool,
    pub method: RoundingMethod,
    pub granularity_minutes: i64,
}

impl Rounding {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            enabled: cfg.rounding_enabled,
            method: RoundingMethod::from_config_str(&cfg.rounding_method),
            granularity_minutes: cfg.rounding_granularity_minutes,
        }
    }

    /// Identity when rounding is disabled.
    pub fn apply(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        if self.enabled {
            round_instant(instant, self.method, self.granularity_minutes)
        } else {
            instant
        }
    }
}
