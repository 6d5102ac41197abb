//! Connection settings for the identity API. Built once and handed to the
//! submitter; the bearer token stays wrapped in a [`SecretString`].

use super::error::LoginError;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Path of the login endpoint below the API base URL.
pub const LOGIN_PATH: &str = "/api/login";

#[derive(Clone, Debug)]
pub struct LoginConfig {
    api_base_url: Url,
    client_id: String,
    bearer_token: SecretString,
}

impl LoginConfig {
    /// # Errors
    /// Returns [`LoginError::Config`] if a value is empty or the base URL is not an
    /// absolute `http`/`https` URL.
    pub fn new(
        api_base_url: &str,
        client_id: &str,
        bearer_token: SecretString,
    ) -> Result<Self, LoginError> {
        let api_base_url = normalize_value(api_base_url)
            .ok_or_else(|| LoginError::Config("API base URL is empty".to_string()))?;
        let client_id = normalize_value(client_id)
            .ok_or_else(|| LoginError::Config("client id is empty".to_string()))?;
        if bearer_token.expose_secret().trim().is_empty() {
            return Err(LoginError::Config("bearer token is empty".to_string()));
        }

        let api_base_url = Url::parse(&api_base_url)
            .map_err(|err| LoginError::Config(format!("invalid API base URL: {err}")))?;
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(LoginError::Config(format!(
                "unsupported scheme {}",
                api_base_url.scheme()
            )));
        }

        Ok(Self {
            api_base_url,
            client_id,
            bearer_token,
        })
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn bearer_token(&self) -> &SecretString {
        &self.bearer_token
    }

    #[must_use]
    pub fn login_url(&self) -> String {
        build_url_with_base(self.api_base_url.as_str(), LOGIN_PATH)
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Joins a base URL and a path with exactly one slash between them.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
