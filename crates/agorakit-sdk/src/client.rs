//! High-level client for Agora's RESTful API.
//!
//! [`AgoraClient`] wraps a [`reqwest::Client`] and exposes typed methods
//! for the project, channel and stream-key endpoints. Every call is a
//! single request/response round-trip: 4xx/5xx answers surface as
//! [`SdkError::Api`] with their status and body, and there is no retry or
//! backoff policy.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use agorakit_sdk::{AgoraClient, AgoraConfig, CustomerCredentials};
//!
//! # async fn run() -> Result<(), agorakit_sdk::SdkError> {
//! let config = AgoraConfig::new(CustomerCredentials::new("key", "secret"));
//! let client = AgoraClient::new(config);
//!
//! for project in client.list_projects().await? {
//!     println!("App ID: {}", project.vendor_key);
//! }
//! # Ok(())
//! # }
//! ```

use agorakit_models::{
    AppId, AppIdStatus, ChannelInfo, ChannelName, ChannelUsage, Project, Uid,
};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::AgoraConfig;
use crate::error::SdkError;

// ---------------------------------------------------------------------------
// Response envelopes (wire shapes of the API answers)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ProjectsResponse {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Deserialize)]
struct ProjectResponse {
    project: Project,
}

#[derive(Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    data: ChannelListData,
}

#[derive(Deserialize, Default)]
struct ChannelListData {
    #[serde(default)]
    channels: Vec<ChannelEntry>,
}

#[derive(Deserialize)]
struct ChannelEntry {
    channel_name: String,
}

#[derive(Deserialize)]
struct ChannelUserResponse {
    #[serde(default)]
    data: ChannelUserData,
}

/// Payload of the per-channel user endpoint. `mode == 2` is live mode,
/// where hosts and audience are reported separately.
#[derive(Deserialize, Default)]
struct ChannelUserData {
    #[serde(default)]
    mode: i64,
    #[serde(default)]
    broadcasters: Vec<serde_json::Value>,
    #[serde(default)]
    audience_total: u64,
    #[serde(default)]
    total: u64,
}

impl From<ChannelUserData> for ChannelUsage {
    fn from(data: ChannelUserData) -> Self {
        if data.mode == 2 {
            ChannelUsage {
                host_count: data.broadcasters.len() as u64,
                user_count: data.audience_total,
            }
        } else {
            ChannelUsage {
                host_count: 0,
                user_count: data.total,
            }
        }
    }
}

#[derive(Deserialize)]
struct StreamKeyResponse {
    #[serde(default)]
    status: String,
    data: Option<StreamKeyData>,
}

#[derive(Deserialize)]
struct StreamKeyData {
    #[serde(rename = "streamKey")]
    stream_key: String,
}

// ---------------------------------------------------------------------------
// AgoraClient
// ---------------------------------------------------------------------------

/// An authenticated Agora REST API client.
#[derive(Debug, Clone)]
pub struct AgoraClient {
    http: reqwest::Client,
    config: AgoraConfig,
    auth_header: String,
}

impl AgoraClient {
    /// Build a client from a configuration.
    pub fn new(config: AgoraConfig) -> Self {
        let auth_header = config.credentials.basic_auth_header();
        Self {
            http: reqwest::Client::new(),
            config,
            auth_header,
        }
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    /// List the account's **active** projects (`status == 1`).
    pub async fn list_projects(&self) -> Result<Vec<Project>, SdkError> {
        let url = format!("{}/dev/v1/projects", self.config.base_url);
        let body: ProjectsResponse = self.get_json(&url).await?;
        Ok(body.projects.into_iter().filter(Project::is_active).collect())
    }

    /// Create a new project, optionally with a primary App Certificate.
    ///
    /// New projects can take ~15 minutes to become fully active, and the
    /// Media Gateway must be enabled in the console before stream keys
    /// work; the caller is expected to relay that to the operator.
    pub async fn create_project(
        &self,
        name: &str,
        enable_sign_key: bool,
    ) -> Result<Project, SdkError> {
        let url = format!("{}/dev/v1/project", self.config.base_url);
        let res = self
            .http
            .post(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&json!({ "name": name, "enable_sign_key": enable_sign_key }))
            .send()
            .await?;
        let body: ProjectResponse = Self::read_json(res).await?;
        Ok(body.project)
    }

    // ------------------------------------------------------------------
    // Channels
    // ------------------------------------------------------------------

    /// Host/audience counts for one channel.
    pub async fn channel_usage(
        &self,
        app_id: &AppId,
        channel: &str,
    ) -> Result<ChannelUsage, SdkError> {
        let url = format!(
            "{}/dev/v1/channel/user/{}/{}",
            self.config.base_url, app_id, channel
        );
        let body: ChannelUserResponse = self.get_json(&url).await?;
        Ok(body.data.into())
    }

    /// List the project's online channels, each enriched with its usage.
    ///
    /// The API only reports channels that currently have members; one
    /// extra request per channel fetches host/audience counts.
    pub async fn list_channels(&self, app_id: &AppId) -> Result<Vec<ChannelInfo>, SdkError> {
        let url = format!("{}/dev/v1/channel/{}", self.config.base_url, app_id);
        let body: ChannelListResponse = self.get_json(&url).await?;

        let mut channels = Vec::with_capacity(body.data.channels.len());
        for entry in body.data.channels {
            let usage = self.channel_usage(app_id, &entry.channel_name).await?;
            channels.push(ChannelInfo {
                channel_name: entry.channel_name,
                usage,
            });
        }
        Ok(channels)
    }

    // ------------------------------------------------------------------
    // Stream keys (RTLS ingress)
    // ------------------------------------------------------------------

    /// Provision an RTMP ingestion stream key for `channel` / `uid`.
    pub async fn stream_key(
        &self,
        app_id: &AppId,
        channel: &ChannelName,
        uid: Uid,
        expires_after_secs: u32,
    ) -> Result<String, SdkError> {
        let url = format!(
            "{}/{}/v1/projects/{}/rtls/ingress/streamkeys",
            self.config.base_url,
            self.config.region.as_path_segment(),
            app_id
        );
        debug!(%app_id, %channel, %uid, "requesting stream key");

        let res = self
            .http
            .post(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&json!({
                "settings": {
                    "channel": channel.as_str(),
                    "uid": uid.to_string(),
                    "expiresAfter": expires_after_secs,
                }
            }))
            .send()
            .await?;

        let body: StreamKeyResponse = Self::read_json(res).await?;
        extract_stream_key(body)
    }

    /// Provision one stream key per uid, in order. Stops at the first
    /// failure (all-or-nothing per invocation, like the rest of the SDK).
    pub async fn batch_stream_keys(
        &self,
        app_id: &AppId,
        channel: &ChannelName,
        uids: &[Uid],
        expires_after_secs: u32,
    ) -> Result<Vec<(Uid, String)>, SdkError> {
        let mut keys = Vec::with_capacity(uids.len());
        for &uid in uids {
            let key = self.stream_key(app_id, channel, uid, expires_after_secs).await?;
            keys.push((uid, key));
        }
        Ok(keys)
    }

    // ------------------------------------------------------------------
    // Shared request plumbing
    // ------------------------------------------------------------------

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SdkError> {
        let res = self
            .http
            .get(url)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await?;
        Self::read_json(res).await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        res: reqwest::Response,
    ) -> Result<T, SdkError> {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SdkError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(res.json().await?)
    }
}

/// Unauthenticated App ID probe (`GET /dev/v1/project/{app_id}`).
///
/// Classifies the project's status from the HTTP status code alone; no
/// credentials are required, so this also works before any are configured.
pub async fn probe_app_id(base_url: &str, app_id: &AppId) -> Result<AppIdStatus, SdkError> {
    let url = format!("{base_url}/dev/v1/project/{app_id}");
    let res = reqwest::Client::new().get(&url).send().await?;
    Ok(AppIdStatus::from_http_status(res.status().as_u16()))
}

/// Pull the stream key out of a response, rejecting non-success payloads.
fn extract_stream_key(body: StreamKeyResponse) -> Result<String, SdkError> {
    if body.status != "success" {
        return Err(SdkError::UnexpectedResponse(format!(
            "stream-key request returned status \"{}\"",
            body.status
        )));
    }
    body.data
        .map(|d| d.stream_key)
        .ok_or_else(|| SdkError::UnexpectedResponse("missing data.streamKey".into()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_mode_usage_counts_hosts_and_audience() {
        let data: ChannelUserResponse = serde_json::from_str(
            r#"{"data": {
                "channel_exist": true,
                "mode": 2,
                "broadcasters": [1001, 1002],
                "audience": [2001],
                "audience_total": 17
            }}"#,
        )
        .unwrap();
        let usage: ChannelUsage = data.data.into();
        assert_eq!(usage.host_count, 2);
        assert_eq!(usage.user_count, 17);
        assert!(usage.is_active());
    }

    #[test]
    fn communication_mode_usage_counts_everyone_as_users() {
        let data: ChannelUserResponse = serde_json::from_str(
            r#"{"data": {"mode": 1, "total": 4, "users": [1, 2, 3, 4]}}"#,
        )
        .unwrap();
        let usage: ChannelUsage = data.data.into();
        assert_eq!(usage.host_count, 0);
        assert_eq!(usage.user_count, 4);
    }

    #[test]
    fn empty_channel_data_is_inactive() {
        let data: ChannelUserResponse = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        let usage: ChannelUsage = data.data.into();
        assert!(!usage.is_active());
    }

    #[test]
    fn projects_response_parses_console_shape() {
        let body: ProjectsResponse = serde_json::from_str(
            r#"{"projects": [
                {"id": "a", "name": "one", "vendor_key": "k1", "status": 1},
                {"id": "b", "name": "two", "vendor_key": "k2", "status": 0}
            ]}"#,
        )
        .unwrap();
        let active: Vec<_> = body.projects.into_iter().filter(Project::is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "one");
    }

    #[test]
    fn stream_key_success_payload() {
        let body: StreamKeyResponse = serde_json::from_str(
            r#"{"status": "success", "data": {"streamKey": "sk-abc123"}}"#,
        )
        .unwrap();
        assert_eq!(extract_stream_key(body).unwrap(), "sk-abc123");
    }

    #[test]
    fn stream_key_failure_status_is_rejected() {
        let body: StreamKeyResponse = serde_json::from_str(
            r#"{"status": "failed", "data": {"streamKey": "sk-abc123"}}"#,
        )
        .unwrap();
        assert!(matches!(
            extract_stream_key(body),
            Err(SdkError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn stream_key_missing_data_is_rejected() {
        let body: StreamKeyResponse =
            serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(matches!(
            extract_stream_key(body),
            Err(SdkError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn channel_list_parses_and_tolerates_missing_data() {
        let body: ChannelListResponse = serde_json::from_str(
            r#"{"data": {"channels": [{"channel_name": "clubCast1", "user_count": 3}]}}"#,
        )
        .unwrap();
        assert_eq!(body.data.channels.len(), 1);
        assert_eq!(body.data.channels[0].channel_name, "clubCast1");

        let empty: ChannelListResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.data.channels.is_empty());
    }
}
