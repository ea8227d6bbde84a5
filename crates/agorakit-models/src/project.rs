//! Project and channel records returned by Agora's RESTful API.
//!
//! Field names mirror the wire format (`vendor_key`, `sign_key`, numeric
//! `status`) so these types deserialize straight from the API responses.

use serde::{Deserialize, Serialize};

/// Numeric project status meaning "active" on the wire.
const STATUS_ACTIVE: i64 = 1;

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// A project registered under a customer account.
///
/// `vendor_key` is the project's App ID; `sign_key` is its primary App
/// Certificate and is only present when token authentication was enabled
/// at creation time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Project {
    /// Console-internal project identifier (used in console URLs).
    pub id: String,
    /// Human-readable project name.
    pub name: String,
    /// The project's App ID.
    pub vendor_key: String,
    /// The project's primary App Certificate, if enabled.
    #[serde(default)]
    pub sign_key: Option<String>,
    /// Numeric status flag (`1` = active).
    #[serde(default)]
    pub status: i64,
}

impl Project {
    /// Whether the project is active (`status == 1`).
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// Host and audience counts for one channel.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelUsage {
    /// Number of hosts currently publishing.
    pub host_count: u64,
    /// Number of users (audience in live mode, everyone otherwise).
    pub user_count: u64,
}

impl ChannelUsage {
    /// A channel counts as active when anyone is in it.
    pub fn is_active(&self) -> bool {
        self.host_count > 0 || self.user_count > 0
    }
}

/// An online channel together with its current usage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChannelInfo {
    /// The channel name.
    pub channel_name: String,
    /// Current usage counts.
    #[serde(flatten)]
    pub usage: ChannelUsage,
}

// ---------------------------------------------------------------------------
// App ID probe
// ---------------------------------------------------------------------------

/// Classified result of the unauthenticated App ID probe
/// (`GET /dev/v1/project/{app_id}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppIdStatus {
    /// The App ID exists and is active.
    Valid,
    /// The App ID was not found.
    NotFound,
    /// The project exists but is not enabled for RTC/Web (HTTP 401).
    NotEnabled,
    /// Anything else; carries the HTTP status code.
    Other(u16),
}

impl AppIdStatus {
    /// Classify a raw HTTP status code the probe endpoint returned.
    pub fn from_http_status(code: u16) -> Self {
        match code {
            200 => AppIdStatus::Valid,
            404 => AppIdStatus::NotFound,
            401 => AppIdStatus::NotEnabled,
            other => AppIdStatus::Other(other),
        }
    }

    /// Human-readable summary suitable for operators.
    pub fn describe(&self) -> String {
        match self {
            AppIdStatus::Valid => "App ID is valid and active".to_string(),
            AppIdStatus::NotFound => {
                "App ID not found or invalid (check the console)".to_string()
            }
            AppIdStatus::NotEnabled => {
                "project exists but may not be enabled for RTC/Web".to_string()
            }
            AppIdStatus::Other(code) => format!(
                "unexpected status {code} (new projects can take ~15 minutes to activate)"
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
