use base64ct::{Base64, Encoding};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Base64 of the sorted-key JSON form of a device snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncodedFingerprint(String);

impl EncodedFingerprint {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedFingerprint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug)]
pub enum DecodeError {
    Base64(base64ct::Error),
    Json(serde_json::Error),
    NotAnObject,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Base64(err) => write!(formatter, "invalid base64: {err}"),
            DecodeError::Json(err) => write!(formatter, "invalid JSON: {err}"),
            DecodeError::NotAnObject => write!(formatter, "fingerprint is not a JSON object"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Compact JSON with top-level keys in lexicographic order. Nested values are
/// written as they are.
#[must_use]
pub fn stable_stringify(object: &Map<String, Value>) -> String {
    let mut keys: Vec<&String> = object.keys().collect();
    keys.sort();

    let mut json = String::from("{");
    for (index, key) in keys.into_iter().enumerate() {
        if index > 0 {
            json.push(',');
        }
        json.push_str(&Value::String(key.clone()).to_string());
        json.push(':');
        json.push_str(&object[key].to_string());
    }
    json.push('}');

    json
}

#[must_use]
pub fn encode_object(object: &Map<String, Value>) -> EncodedFingerprint {
    EncodedFingerprint(Base64::encode_string(stable_stringify(object).as_bytes()))
}

/// Reverse of [`encode_object`], for diagnostics.
///
/// # Errors
/// Returns an error if the input is not base64 or does not hold a JSON object.
pub fn decode_fingerprint(encoded: &str) -> Result<Map<String, Value>, DecodeError> {
    let bytes = Base64::decode_vec(encoded.trim()).map_err(DecodeError::Base64)?;

    match serde_json::from_slice(&bytes).map_err(DecodeError::Json)? {
        Value::Object(object) => Ok(object),
        _ => Err(DecodeError::NotAnObject),
    }
}
