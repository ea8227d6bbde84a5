//! Channel roles and service regions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The role a credential grants inside a channel.
///
/// Wire values follow Agora's convention: `1` for a publisher (host),
/// `2` for a subscriber (audience member).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May join and publish audio, video, and data streams.
    Publisher,
    /// May join and receive streams only.
    Subscriber,
}

impl Role {
    /// The numeric wire value (`1` = publisher, `2` = subscriber).
    pub fn wire_value(self) -> u8 {
        match self {
            Role::Publisher => 1,
            Role::Subscriber => 2,
        }
    }

    /// Parse either a role name (`"publisher"`, `"subscriber"`) or a wire
    /// value (`"1"`, `"2"`).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidRole`] for anything else.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        match s {
            "1" => Ok(Role::Publisher),
            "2" => Ok(Role::Subscriber),
            other => Role::from_str(other).map_err(|_| ModelError::InvalidRole {
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// Regional prefix of Agora's RESTful API endpoints.
///
/// Used in region-scoped paths such as the RTLS stream-key endpoint
/// (`/{region}/v1/projects/...`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, Default)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// North America (the default).
    #[default]
    Na,
    /// Europe.
    Eu,
    /// Asia-Pacific.
    Ap,
    /// Mainland China.
    Cn,
}

impl Region {
    /// The path segment used in regional REST URLs.
    pub fn as_path_segment(self) -> &'static str {
        match self {
            Region::Na => "na",
            Region::Eu => "eu",
            Region::Ap => "ap",
            Region::Cn => "cn",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
