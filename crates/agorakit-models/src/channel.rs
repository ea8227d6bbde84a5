//! Channel addressing types.
//!
//! A credential authorizes one user ([`Uid`]) to join one [`ChannelName`].
//! Channel names follow Agora's published constraint of at most 64 bytes of
//! printable ASCII.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Maximum channel-name length in bytes, per Agora's documentation.
pub const MAX_CHANNEL_NAME_LEN: usize = 64;

// ---------------------------------------------------------------------------
// ChannelName
// ---------------------------------------------------------------------------

/// Name of an Agora channel.
///
/// # Examples
///
/// ```
/// use agorakit_models::ChannelName;
///
/// let ch: ChannelName = "clubCast1".parse().unwrap();
/// assert_eq!(ch.as_str(), "clubCast1");
///
/// assert!("".parse::<ChannelName>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelName(String);

impl ChannelName {
    /// Validate and wrap a raw channel name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidChannelName`] if the name is empty,
    /// longer than [`MAX_CHANNEL_NAME_LEN`] bytes, or contains
    /// non-printable or non-ASCII characters.
    pub fn new(name: &str) -> Result<Self, ModelError> {
        if name.is_empty() {
            return Err(Self::invalid(name, "must not be empty"));
        }
        if name.len() > MAX_CHANNEL_NAME_LEN {
            return Err(Self::invalid(name, "must be at most 64 bytes"));
        }
        if !name.bytes().all(|b| (0x20..0x7f).contains(&b)) {
            return Err(Self::invalid(name, "must be printable ASCII"));
        }
        Ok(Self(name.to_string()))
    }

    fn invalid(value: &str, reason: &str) -> ModelError {
        ModelError::InvalidChannelName {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChannelName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChannelName {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<ChannelName> for String {
    fn from(ch: ChannelName) -> Self {
        ch.0
    }
}

// ---------------------------------------------------------------------------
// Uid
// ---------------------------------------------------------------------------

/// A 32-bit unsigned user identifier.
///
/// `Uid(0)` asks Agora to auto-assign an id at join time. On the wire the
/// uid travels as its decimal string form, which [`Uid::to_string`]
/// produces.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct Uid(
    /// The raw numeric id.
    pub u32,
);

impl Uid {
    /// The auto-assign sentinel.
    pub const AUTO: Uid = Uid(0);

    /// Return the numeric value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Uid {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl FromStr for Uid {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_name_accepts_typical_names() {
        assert!(ChannelName::new("clubCast1").is_ok());
        assert!(ChannelName::new("room-42_test.channel").is_ok());
    }

    #[test]
    fn channel_name_rejects_empty() {
        let err = ChannelName::new("").unwrap_err();
        assert!(matches!(err, ModelError::InvalidChannelName { .. }));
    }

    #[test]
    fn channel_name_rejects_over_64_bytes() {
        let long = "x".repeat(65);
        assert!(ChannelName::new(&long).is_err());
        assert!(ChannelName::new(&"x".repeat(64)).is_ok());
    }

    #[test]
    fn channel_name_rejects_non_ascii() {
        assert!(ChannelName::new("salle-café").is_err());
        assert!(ChannelName::new("tab\there").is_err());
    }

    #[test]
    fn uid_display_is_decimal() {
        assert_eq!(Uid(0).to_string(), "0");
        assert_eq!(Uid(4_294_967_295).to_string(), "4294967295");
    }

    #[test]
    fn uid_parses_u32_range_only() {
        assert_eq!("12345".parse::<Uid>().unwrap(), Uid(12345));
        assert!("4294967296".parse::<Uid>().is_err());
        assert!("-1".parse::<Uid>().is_err());
    }
}
