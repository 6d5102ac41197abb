//! The single HTTP call of a login submission.

use super::{config::LoginConfig, error::LoginError, LoginRequest};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, instrument};

/// POST the request and parse whatever comes back as JSON. The status code is
/// only logged; the identity API answers errors with JSON bodies too.
#[instrument(skip_all, fields(url = %config.login_url()))]
pub async fn post_login(
    client: &Client,
    config: &LoginConfig,
    request: &LoginRequest<'_>,
) -> Result<Value, LoginError> {
    let response = client
        .post(config.login_url())
        .bearer_auth(config.bearer_token().expose_secret())
        .json(request)
        .send()
        .await
        .map_err(map_request_error)?;

    debug!("login response status: {}", response.status());

    response
        .json::<Value>()
        .await
        .map_err(|err| LoginError::Parse(format!("Failed to decode response: {err}")))
}

fn map_request_error(err: reqwest::Error) -> LoginError {
    if err.is_timeout() {
        LoginError::Timeout(format!("Request timed out: {err}"))
    } else if err.is_builder() {
        LoginError::Serialization(format!("Failed to build request: {err}"))
    } else {
        LoginError::Network(format!("Unable to reach the server: {err}"))
    }
}
