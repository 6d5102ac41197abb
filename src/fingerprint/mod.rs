//! Device fingerprint collection and encoding.
//!
//! A fingerprint is a snapshot of device attributes plus one coarse geolocation
//! sample, serialized with sorted top-level keys and base64 encoded. The encoding
//! is deterministic so the identity API can recognize a returning device by exact
//! match.

pub mod encode;
pub mod geolocation;

pub use self::encode::{decode_fingerprint, stable_stringify, DecodeError, EncodedFingerprint};
pub use self::geolocation::{acquire_geolocation, GeoSample, DEFAULT_GEOLOCATION_TIMEOUT};

use crate::platform::Platform;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, instrument};

pub const UNKNOWN_ORIENTATION: &str = "unknown";

/// Device attributes captured at submit time. Unknown attributes are `None` and
/// serialize as `null`; `geolocation` is always present.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceSnapshot {
    pub user_agent: Option<String>,
    pub language: Option<String>,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    pub color_depth: Option<u32>,
    pub timezone: Option<String>,
    pub hardware_concurrency: Option<u32>,
    pub device_memory: Option<f64>,
    /// `Some(true)` or `None`; a platform without touch input gives no signal.
    pub touch_support: Option<bool>,
    pub cookie_enabled: bool,
    pub session_storage: bool,
    pub local_storage: bool,
    pub screen_orientation: String,
    pub languages: Vec<String>,
    pub geolocation: Option<GeoSample>,
}

impl DeviceSnapshot {
    /// JSON object form, keys in collection order.
    #[must_use]
    pub fn to_object(&self) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("user_agent".to_string(), json!(self.user_agent));
        object.insert("language".to_string(), json!(self.language));
        object.insert("screen_width".to_string(), json!(self.screen_width));
        object.insert("screen_height".to_string(), json!(self.screen_height));
        object.insert("color_depth".to_string(), json!(self.color_depth));
        object.insert("timezone".to_string(), json!(self.timezone));
        object.insert(
            "hardware_concurrency".to_string(),
            json!(self.hardware_concurrency),
        );
        object.insert(
            "device_memory".to_string(),
            self.device_memory.map_or(Value::Null, number_value),
        );
        object.insert("touch_support".to_string(), json!(self.touch_support));
        object.insert("cookie_enabled".to_string(), json!(self.cookie_enabled));
        object.insert("session_storage".to_string(), json!(self.session_storage));
        object.insert("local_storage".to_string(), json!(self.local_storage));
        object.insert(
            "screen_orientation".to_string(),
            json!(self.screen_orientation),
        );
        object.insert("languages".to_string(), json!(self.languages));
        object.insert("geolocation".to_string(), json!(self.geolocation));
        object
    }
}

/// Whole numbers are written without a fraction (`8`, not `8.0`).
fn number_value(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 {
        #[allow(clippy::cast_possible_truncation)]
        return json!(number as i64);
    }
    json!(number)
}

#[must_use]
pub fn encode_fingerprint(snapshot: &DeviceSnapshot) -> EncodedFingerprint {
    encode::encode_object(&snapshot.to_object())
}

/// Read every attribute from `platform` and wait at most `geolocation_timeout` for
/// a position. Never fails; missing attributes degrade to `None`.
#[instrument(skip(platform))]
pub async fn collect_device_snapshot<P: Platform>(
    platform: &P,
    geolocation_timeout: Duration,
) -> DeviceSnapshot {
    let screen = platform.screen();
    let language = platform.language();
    let languages = platform
        .languages()
        .unwrap_or_else(|| language.iter().cloned().collect());

    let geolocation = acquire_geolocation(platform.geolocation(), geolocation_timeout).await;

    DeviceSnapshot {
        user_agent: platform.user_agent(),
        language,
        screen_width: screen.as_ref().map(|screen| screen.width),
        screen_height: screen.as_ref().map(|screen| screen.height),
        color_depth: screen.as_ref().map(|screen| screen.color_depth),
        timezone: platform.timezone(),
        hardware_concurrency: platform.hardware_concurrency().filter(|count| *count > 0),
        device_memory: platform
            .device_memory()
            .filter(|memory| memory.is_finite() && *memory > 0.0),
        touch_support: platform.touch_support().then_some(true),
        cookie_enabled: platform.cookie_enabled(),
        session_storage: platform.session_storage(),
        local_storage: platform.local_storage(),
        screen_orientation: screen
            .and_then(|screen| screen.orientation)
            .unwrap_or_else(|| UNKNOWN_ORIENTATION.to_string()),
        languages,
        geolocation,
    }
}

/// A snapshot together with its encoded form.
#[derive(Clone, Debug)]
pub struct Fingerprint {
    pub snapshot: DeviceSnapshot,
    pub encoded: EncodedFingerprint,
}

impl Fingerprint {
    pub async fn collect<P: Platform>(platform: &P, geolocation_timeout: Duration) -> Self {
        let snapshot = collect_device_snapshot(platform, geolocation_timeout).await;
        let encoded = encode_fingerprint(&snapshot);

        let object = Value::Object(snapshot.to_object());
        debug!("device snapshot: {}", object);
        debug!("encoded fingerprint: {}", encoded);

        Self { snapshot, encoded }
    }
}
