//! # Envelope Message Body
//!
//! The message is either plaintext JSON or an opaque ciphertext string. The
//! variant, not a side flag, is the source of truth for encryption state.
//!
//! ## Wire Form
//!
//! - `Plaintext` is embedded verbatim as a JSON value (`"message": {...}`).
//! - `Ciphertext` is a JSON string (`"message": "9f2c..."`).
//!
//! Plaintext is held in the exact form it is embedded on the wire (surrounding
//! whitespace removed), so the signed bytes and the transmitted bytes are
//! identical.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::errors::TypesError;

/// Validated JSON text of a plaintext message.
///
/// Only constructed through [`Message::plaintext`] or deserialization, so it
/// always holds a single non-string JSON value with no surrounding whitespace.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainJson(String);

impl PlainJson {
    /// The JSON text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlainJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlainJson").field(&self.0).finish()
    }
}

/// Body of an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Serialized JSON, not yet encrypted.
    Plaintext(PlainJson),
    /// Ciphertext produced by the crypto provider.
    Ciphertext(String),
}

impl Message {
    /// Build a plaintext message from already-serialized JSON text.
    ///
    /// The text must be a single valid JSON value that is not a string;
    /// a bare JSON string would be indistinguishable from ciphertext on the wire.
    /// Leading and trailing whitespace is dropped.
    pub fn plaintext(json: impl Into<String>) -> Result<Self, TypesError> {
        let raw = RawValue::from_string(json.into())
            .map_err(|e| TypesError::InvalidPlaintext(e.to_string()))?;
        Self::from_raw(&raw)
    }

    /// Serialize `value` and wrap it as a plaintext message.
    pub fn from_value<T: Serialize>(value: &T) -> Result<Self, TypesError> {
        let json =
            serde_json::to_string(value).map_err(|e| TypesError::InvalidPlaintext(e.to_string()))?;
        Self::plaintext(json)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, TypesError> {
        let text = raw.get().trim();
        if text.starts_with('"') {
            return Err(TypesError::InvalidPlaintext(
                "plaintext message must not be a bare JSON string".into(),
            ));
        }
        Ok(Self::Plaintext(PlainJson(text.to_string())))
    }

    /// True if this message holds ciphertext.
    pub fn is_ciphertext(&self) -> bool {
        matches!(self, Self::Ciphertext(_))
    }

    /// The exact text that is signed and transmitted.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plaintext(json) => json.as_str(),
            Self::Ciphertext(text) => text,
        }
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Plaintext(json) => {
                let raw = RawValue::from_string(json.0.clone()).map_err(serde::ser::Error::custom)?;
                raw.serialize(serializer)
            }
            Self::Ciphertext(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        if raw.get().trim_start().starts_with('"') {
            let text: String = serde_json::from_str(raw.get()).map_err(D::Error::custom)?;
            Ok(Self::Ciphertext(text))
        } else {
            Self::from_raw(&raw).map_err(D::Error::custom)
        }
    }
}
