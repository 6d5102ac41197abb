use crate::{
    cli::commands::{device, login::Options},
    login::{LoginConfig, LoginForm, LoginSubmitter, Status, SubmitOptions, TerminalStatus},
    platform::{FixedGeolocation, HostPlatform},
};
use anyhow::{bail, Result};
use std::time::Duration;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub device: device::Options,
    pub options: Options,
}

/// Build the platform for this host, with the configured position if any.
pub(crate) fn host_platform(device: &device::Options) -> HostPlatform {
    match device.location.as_deref() {
        Some(location) => HostPlatform::new().with_geolocation(FixedGeolocation::parse(location)),
        None => HostPlatform::new(),
    }
}

/// Submit one login and render its outcome.
///
/// # Errors
/// Returns an error if the configuration is invalid or the login fails.
pub async fn execute(args: Args) -> Result<()> {
    let Args { device, options } = args;

    let config = LoginConfig::new(&options.api_url, &options.client_id, options.token)?;

    let submitter = LoginSubmitter::new(
        config,
        host_platform(&device),
        SubmitOptions {
            geolocation_timeout: device.geolocation_timeout,
            request_timeout: Duration::from_secs(options.timeout_seconds),
        },
    )?;

    info!("logging in as {}", options.username);

    let form = LoginForm {
        username: options.username,
        password: options.password,
        one_time_password: options.otp,
        trust_device: options.trust_device,
    };

    match submitter.handle_submit(&form, &TerminalStatus).await {
        Status::Success(_) => Ok(()),
        _ => bail!("login failed"),
    }
}
