//! Capability providers for the device attributes that make up a fingerprint.
//!
//! The collector never reads ambient state directly; everything goes through a
//! [`Platform`], so tests can substitute deterministic doubles and the CLI can use
//! [`HostPlatform`].

pub mod host;

#[cfg(test)]
pub(crate) mod testing;

pub use self::host::{FixedGeolocation, HostPlatform};

use std::{fmt, future::Future, time::Duration};

/// Display properties of the primary screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    /// Orientation type, e.g. `landscape-primary`.
    pub orientation: Option<String>,
}

/// Query options handed to [`Geolocation::current_position`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// A cached fix up to this age may be returned without a fresh reading.
    pub maximum_age: Duration,
}

/// A position fix as reported by the platform. Coordinates are optional because a
/// provider may hand back a fix without usable numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Position {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionError {
    PermissionDenied,
    PositionUnavailable(String),
    Timeout,
}

impl fmt::Display for PositionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::PermissionDenied => write!(formatter, "permission denied"),
            PositionError::PositionUnavailable(message) => {
                write!(formatter, "position unavailable: {message}")
            }
            PositionError::Timeout => write!(formatter, "timeout"),
        }
    }
}

impl std::error::Error for PositionError {}

/// Source of position fixes.
pub trait Geolocation: Send + Sync {
    fn current_position(
        &self,
        options: PositionOptions,
    ) -> impl Future<Output = Result<Position, PositionError>> + Send;
}

/// Device and runtime attributes. Anything the environment cannot tell is `None`.
pub trait Platform: Send + Sync {
    type Geolocation: Geolocation;

    fn user_agent(&self) -> Option<String>;

    fn language(&self) -> Option<String>;

    /// Preferred languages, most preferred first.
    fn languages(&self) -> Option<Vec<String>>;

    /// IANA timezone name.
    fn timezone(&self) -> Option<String>;

    fn screen(&self) -> Option<Screen>;

    fn hardware_concurrency(&self) -> Option<u32>;

    /// Approximate memory in GiB.
    fn device_memory(&self) -> Option<f64>;

    fn touch_support(&self) -> bool;

    fn cookie_enabled(&self) -> bool;

    fn session_storage(&self) -> bool;

    fn local_storage(&self) -> bool;

    /// `None` when the platform has no geolocation capability at all.
    fn geolocation(&self) -> Option<&Self::Geolocation>;
}
