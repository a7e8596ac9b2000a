/*
 *  decoder.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Config payload decoding
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use serde_json::Value;
use thiserror::Error;

use crate::constants::MAX_PAYLOAD_BYTES;

/// Payload could not be turned into structured data
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload of {len} bytes exceeds the {max} byte limit")]
    TooLarge { len: usize, max: usize },
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Turns payload text into typed values keyed by string.
///
/// The decoder only parses; the watch face decides what shape is acceptable.
pub trait ConfigDecoder: Send {
    fn decode(&self, payload: &str) -> Result<Value, DecodeError>;
}

/// serde_json backed decoder with a payload size cap
#[derive(Debug, Clone, Copy)]
pub struct JsonDecoder {
    max_bytes: usize,
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self { max_bytes: MAX_PAYLOAD_BYTES }
    }

    pub fn with_limit(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDecoder for JsonDecoder {
    fn decode(&self, payload: &str) -> Result<Value, DecodeError> {
        if payload.len() > self.max_bytes {
            return Err(DecodeError::TooLarge { len: payload.len(), max: self.max_bytes });
        }
        Ok(serde_json::from_str(payload)?)
    }
}

/// Short name of a JSON value's type, for log lines and errors
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_object() {
        let v = JsonDecoder::new().decode(r#"{"is24h": false}"#).unwrap();
        assert_eq!(v["is24h"], Value::Bool(false));
    }

    #[test]
    fn test_non_object_still_decodes() {
        // shape checks belong to the caller
        let v = JsonDecoder::new().decode(r#""just a string""#).unwrap();
        assert_eq!(kind_of(&v), "string");
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(JsonDecoder::new().decode("{bgColor:"), Err(DecodeError::Malformed(_))));
        assert!(matches!(JsonDecoder::new().decode(""), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_size_limit() {
        let decoder = JsonDecoder::with_limit(8);
        let err = decoder.decode(r#"{"showBPM":true}"#).unwrap_err();
        assert!(matches!(err, DecodeError::TooLarge { len: 16, max: 8 }));
        assert!(decoder.decode("{}").is_ok());
    }
}
