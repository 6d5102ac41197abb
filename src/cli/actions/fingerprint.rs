use crate::{
    cli::{actions::login::host_platform, commands::device},
    fingerprint::{decode_fingerprint, Fingerprint},
};
use anyhow::{Context, Result};
use serde_json::Value;

#[derive(Debug)]
pub struct Args {
    pub device: device::Options,
    pub decode: Option<String>,
}

/// Print the decoded object of `--decode`, or collect this device's fingerprint
/// and print the snapshot followed by its encoded form.
///
/// # Errors
/// Returns an error if the value to decode is not a fingerprint.
pub async fn execute(args: Args) -> Result<()> {
    if let Some(encoded) = args.decode {
        let object = decode_fingerprint(encoded.trim()).context("invalid fingerprint")?;
        println!("{}", serde_json::to_string_pretty(&Value::Object(object))?);
        return Ok(());
    }

    let platform = host_platform(&args.device);
    let fingerprint = Fingerprint::collect(&platform, args.device.geolocation_timeout).await;

    println!(
        "{}",
        serde_json::to_string_pretty(&Value::Object(fingerprint.snapshot.to_object()))?
    );
    println!("{}", fingerprint.encoded);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn device() -> device::Options {
        device::Options {
            geolocation_timeout: Duration::from_millis(100),
            location: None,
        }
    }

    #[tokio::test]
    async fn decode_rejects_garbage() {
        let result = execute(Args {
            device: device(),
            decode: Some("not a fingerprint".to_string()),
        })
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn decode_accepts_encoded_object() {
        let result = execute(Args {
            device: device(),
            decode: Some("eyJhIjoyLCJiIjoxfQ==".to_string()),
        })
        .await;

        assert!(result.is_ok());
    }
}
