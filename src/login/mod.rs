//! Login submission: credentials plus device fingerprint, one POST, one rendered
//! outcome.

pub mod api;
pub mod config;
pub mod error;
pub mod status;

pub use self::config::LoginConfig;
pub use self::error::LoginError;
pub use self::status::{Status, StatusSink, TerminalStatus};

use crate::{
    fingerprint::{EncodedFingerprint, Fingerprint, DEFAULT_GEOLOCATION_TIMEOUT},
    platform::Platform,
    APP_USER_AGENT,
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::{fmt, time::Duration};
use tracing::{error, info, instrument};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Values typed by the user.
#[derive(Clone, Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: SecretString,
    pub one_time_password: String,
    pub trust_device: bool,
}

/// Body of `POST /api/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    client_id: &'a str,
    one_time_password: &'a str,
    trust_device: bool,
    device: &'a EncodedFingerprint,
}

impl<'a> LoginRequest<'a> {
    #[must_use]
    pub fn new(form: &'a LoginForm, client_id: &'a str, device: &'a EncodedFingerprint) -> Self {
        Self {
            username: &form.username,
            password: form.password.expose_secret(),
            client_id,
            one_time_password: &form.one_time_password,
            trust_device: form.trust_device,
            device,
        }
    }
}

impl fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("one_time_password", &"[REDACTED]")
            .field("trust_device", &self.trust_device)
            .field("device", &self.device.as_str())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitOptions {
    pub geolocation_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            geolocation_timeout: DEFAULT_GEOLOCATION_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

pub struct LoginSubmitter<P> {
    config: LoginConfig,
    platform: P,
    client: Client,
    geolocation_timeout: Duration,
}

impl<P: Platform> LoginSubmitter<P> {
    /// # Errors
    /// Returns [`LoginError::Config`] if the HTTP client cannot be built.
    pub fn new(config: LoginConfig, platform: P, options: SubmitOptions) -> Result<Self, LoginError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(options.request_timeout)
            .build()
            .map_err(|err| LoginError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            config,
            platform,
            client,
            geolocation_timeout: options.geolocation_timeout,
        })
    }

    /// Run one submission and report every status change to `sink`. Failures are
    /// logged and rendered, never returned.
    #[instrument(skip_all, fields(username = %form.username, trust_device = form.trust_device))]
    pub async fn handle_submit<S: StatusSink>(&self, form: &LoginForm, sink: &S) -> Status {
        sink.show(&Status::Submitting);

        let status = match self.submit(form).await {
            Ok(body) => {
                info!("login response received");
                Status::Success(body)
            }
            Err(err) => {
                error!("login failed: {}", err);
                Status::Failure
            }
        };

        sink.show(&status);

        status
    }

    /// Collect the fingerprint, send the request and pretty-print the response.
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent or the body is not JSON.
    pub async fn submit(&self, form: &LoginForm) -> Result<String, LoginError> {
        let fingerprint = Fingerprint::collect(&self.platform, self.geolocation_timeout).await;

        let request = LoginRequest::new(form, self.config.client_id(), &fingerprint.encoded);

        let body = api::post_login(&self.client, &self.config, &request).await?;

        serde_json::to_string_pretty(&body)
            .map_err(|err| LoginError::Serialization(format!("Failed to render response: {err}")))
    }
}
