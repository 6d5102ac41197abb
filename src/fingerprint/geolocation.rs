use crate::platform::{Geolocation, Position, PositionOptions};
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

pub const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Oldest cached fix the platform may hand back instead of taking a new reading.
pub const MAXIMUM_POSITION_AGE: Duration = Duration::from_millis(60_000);

/// Coarse location, two decimal places per coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeoSample {
    pub latitude: String,
    pub longitude: String,
}

impl GeoSample {
    /// Returns `None` unless both coordinates are present and finite.
    #[must_use]
    pub fn from_position(position: &Position) -> Option<Self> {
        match (position.latitude, position.longitude) {
            (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
                Some(Self {
                    latitude: format_coordinate(latitude),
                    longitude: format_coordinate(longitude),
                })
            }
            _ => None,
        }
    }
}

/// Race one position query against `limit`. Errors, invalid fixes and timeouts all
/// come back as `None`. When the timer wins, the pending query is dropped.
pub async fn acquire_geolocation<G: Geolocation>(
    geolocation: Option<&G>,
    limit: Duration,
) -> Option<GeoSample> {
    let Some(geolocation) = geolocation else {
        debug!("geolocation not available");
        return None;
    };

    let options = PositionOptions {
        enable_high_accuracy: false,
        timeout: limit,
        maximum_age: MAXIMUM_POSITION_AGE,
    };

    match timeout(limit, geolocation.current_position(options)).await {
        Ok(Ok(position)) => {
            let sample = GeoSample::from_position(&position);
            if sample.is_none() {
                debug!("discarding position without numeric coordinates: {:?}", position);
            }
            sample
        }
        Ok(Err(err)) => {
            debug!("geolocation failed: {}", err);
            None
        }
        Err(_) => {
            debug!("geolocation timed out after {:?}", limit);
            None
        }
    }
}

/// Fixed two-decimal rendering. Exact ties round away from zero and negative zero
/// prints unsigned.
fn format_coordinate(value: f64) -> String {
    // Only multiples of 1/8 with an odd numerator land exactly on a tie.
    let eighths = value * 8.0;
    let value = if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        (value * 100.0).round() / 100.0
    } else if value == 0.0 {
        0.0
    } else {
        value
    };

    format!("{value:.2}")
}
