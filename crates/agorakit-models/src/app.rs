//! Agora project identity types.
//!
//! An Agora project is identified by its public [`AppId`] and, when token
//! authentication is enabled, carries a private [`AppCertificate`] used to
//! sign credentials. Both are issued by the Agora console as 32-character
//! lowercase hex strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Check that `s` is exactly 32 lowercase hex characters.
fn is_hex32(s: &str) -> bool {
    s.len() == 32
        && s.bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

// ---------------------------------------------------------------------------
// AppId
// ---------------------------------------------------------------------------

/// Agora-issued public project identifier.
///
/// Always exactly 32 lowercase hex characters; construction validates this,
/// so an `AppId` in hand is known well-formed.
///
/// # Examples
///
/// ```
/// use agorakit_models::AppId;
///
/// let id: AppId = "f76e8ace079b47deb51d9703a1ca925a".parse().unwrap();
/// assert_eq!(id.as_str(), "f76e8ace079b47deb51d9703a1ca925a");
///
/// assert!("not-an-app-id".parse::<AppId>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct AppId(String);

impl AppId {
    /// Validate and wrap a raw App ID string.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidAppId`] unless the value is exactly
    /// 32 lowercase hex characters.
    pub fn new(id: &str) -> Result<Self, ModelError> {
        if is_hex32(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(ModelError::InvalidAppId {
                value: id.to_string(),
                reason: "must be exactly 32 lowercase hex characters".to_string(),
            })
        }
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AppId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AppId {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<AppId> for String {
    fn from(id: AppId) -> Self {
        id.0
    }
}

// ---------------------------------------------------------------------------
// AppCertificate
// ---------------------------------------------------------------------------

/// Agora-issued private signing secret, paired with an [`AppId`].
///
/// The certificate is the HMAC key for every credential this project signs.
/// It must come from runtime configuration — never from a source literal —
/// and its `Debug` form is redacted so it cannot leak through logs.
#[derive(Clone)]
pub struct AppCertificate(String);

impl AppCertificate {
    /// Validate and wrap a raw certificate string.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidCertificate`] unless the value is
    /// exactly 32 lowercase hex characters. The rejected value is not
    /// included in the error.
    pub fn new(cert: &str) -> Result<Self, ModelError> {
        if is_hex32(cert) {
            Ok(Self(cert.to_string()))
        } else {
            Err(ModelError::InvalidCertificate {
                reason: "must be exactly 32 lowercase hex characters".to_string(),
            })
        }
    }

    /// The certificate as utf-8 text (the MAC key of the versioned scheme).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The certificate hex-decoded to its 16 raw bytes (the MAC key of the
    /// legacy compact scheme).
    pub fn as_raw_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        for (i, chunk) in self.0.as_bytes().chunks_exact(2).enumerate() {
            // Infallible: construction guaranteed lowercase hex.
            let hi = hex_val(chunk[0]);
            let lo = hex_val(chunk[1]);
            out[i] = (hi << 4) | lo;
        }
        out
    }
}

fn hex_val(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        _ => b - b'a' + 10,
    }
}

impl fmt::Debug for AppCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppCertificate([REDACTED])")
    }
}

impl FromStr for AppCertificate {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
