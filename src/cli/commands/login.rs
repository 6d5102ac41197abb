use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_CLIENT_ID: &str = "client-id";
pub const ARG_TOKEN: &str = "token";
pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_OTP: &str = "otp";
pub const ARG_TRUST_DEVICE: &str = "trust-device";
pub const ARG_TIMEOUT: &str = "timeout";

#[derive(Clone, Debug)]
pub struct Options {
    pub api_url: String,
    pub client_id: String,
    pub token: SecretString,
    pub username: String,
    pub password: SecretString,
    pub otp: String,
    pub trust_device: bool,
    pub timeout_seconds: u64,
}

impl Options {
    /// Parse login arguments from the `login` subcommand matches.
    ///
    /// # Errors
    /// Returns an error if required arguments are missing or empty.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let read_required = |id: &str| -> anyhow::Result<String> {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
        };

        Ok(Self {
            api_url: read_required(ARG_API_URL)?,
            client_id: read_required(ARG_CLIENT_ID)?,
            token: SecretString::from(read_required(ARG_TOKEN)?),
            username: read_required(ARG_USERNAME)?,
            // passwords are sent as typed, surrounding spaces included
            password: SecretString::from(
                matches
                    .get_one::<String>(ARG_PASSWORD)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_PASSWORD}"))?,
            ),
            otp: matches.get_one::<String>(ARG_OTP).cloned().unwrap_or_default(),
            trust_device: matches.get_flag(ARG_TRUST_DEVICE),
            timeout_seconds: matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(10),
        })
    }
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new("login")
        .about("Submit credentials together with this device's fingerprint")
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Identity API base URL, example: https://id.example.com")
                .env("DEVICE_LOGIN_API_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_CLIENT_ID)
                .long(ARG_CLIENT_ID)
                .help("Client identifier registered with the identity API")
                .env("DEVICE_LOGIN_CLIENT_ID")
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN)
                .long(ARG_TOKEN)
                .help("Bearer token for the identity API")
                .env("DEVICE_LOGIN_TOKEN")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_USERNAME)
                .short('u')
                .long(ARG_USERNAME)
                .help("Account username")
                .env("DEVICE_LOGIN_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Account password")
                .env("DEVICE_LOGIN_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_OTP)
                .long(ARG_OTP)
                .help("One-time password")
                .default_value(""),
        )
        .arg(
            Arg::new(ARG_TRUST_DEVICE)
                .long(ARG_TRUST_DEVICE)
                .help("Ask the identity API to trust this device")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("HTTP request timeout in seconds")
                .env("DEVICE_LOGIN_TIMEOUT")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
