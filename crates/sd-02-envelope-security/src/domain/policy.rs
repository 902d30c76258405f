//! The four sign/encrypt policy branches.

use serde::{Deserialize, Serialize};

/// Which transformations `secure()` applies.
///
/// | Policy | Message | Flag | Signature |
/// |--------|---------|------|-----------|
/// | `Plain` | unchanged | false | none |
/// | `EncryptOnly` | ciphertext | true | none |
/// | `SignOnly` | unchanged | false | hash(message + header) |
/// | `EncryptAndSign` | ciphertext | true | hash(ciphertext + header) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityPolicy {
    /// Neither sign nor encrypt
    Plain,
    /// Encrypt only
    EncryptOnly,
    /// Sign only
    SignOnly,
    /// Encrypt, then sign the ciphertext
    EncryptAndSign,
}

impl SecurityPolicy {
    /// Select a branch from the two switches.
    pub fn from_flags(sign_enabled: bool, encrypt_enabled: bool) -> Self {
        match (sign_enabled, encrypt_enabled) {
            (false, false) => Self::Plain,
            (false, true) => Self::EncryptOnly,
            (true, false) => Self::SignOnly,
            (true, true) => Self::EncryptAndSign,
        }
    }

    /// True if the message body is encrypted.
    pub fn encrypts(self) -> bool {
        matches!(self, Self::EncryptOnly | Self::EncryptAndSign)
    }

    /// True if a signature is attached.
    pub fn signs(self) -> bool {
        matches!(self, Self::SignOnly | Self::EncryptAndSign)
    }
}

impl std::fmt::Display for SecurityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Plain => "plain",
            Self::EncryptOnly => "encrypt_only",
            Self::SignOnly => "sign_only",
            Self::EncryptAndSign => "encrypt_and_sign",
        };
        f.write_str(name)
    }
}
