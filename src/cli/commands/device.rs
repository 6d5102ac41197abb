use clap::{Arg, ArgMatches, Command};
use std::time::Duration;

pub const ARG_GEOLOCATION_TIMEOUT: &str = "geolocation-timeout";
pub const ARG_LOCATION: &str = "location";

/// Fingerprint collection settings shared by every subcommand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub geolocation_timeout: Duration,
    pub location: Option<String>,
}

impl Options {
    /// Parse device arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the geolocation timeout is missing.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let timeout_ms = matches
            .get_one::<u64>(ARG_GEOLOCATION_TIMEOUT)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_GEOLOCATION_TIMEOUT}"))?;

        Ok(Self {
            geolocation_timeout: Duration::from_millis(timeout_ms),
            location: matches
                .get_one::<String>(ARG_LOCATION)
                .cloned()
                .filter(|v| !v.trim().is_empty()),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_GEOLOCATION_TIMEOUT)
                .long(ARG_GEOLOCATION_TIMEOUT)
                .help("Milliseconds to wait for a position before sending without one")
                .env("DEVICE_LOGIN_GEOLOCATION_TIMEOUT")
                .default_value("20000")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_LOCATION)
                .long(ARG_LOCATION)
                .help("Position reported to the identity API, as LAT,LON")
                .env("DEVICE_LOGIN_LOCATION")
                .allow_hyphen_values(true)
                .global(true),
        )
}
