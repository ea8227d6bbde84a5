//! Legacy compact RTC token.
//!
//! The pre-AccessToken scheme: a flat binary body prefixed with version
//! bytes `0x00 0x02`, MAC'd with the *hex-decoded* certificate and encoded
//! as `base64(signature || body)`:
//!
//! ```text
//! body = 00 02 | u32 len | app_id | u32 len | channel | u32 len | uid
//!        | u32 expire_at | u8 role
//! ```
//!
//! Unlike the versioned scheme the expiry here is an absolute unix
//! timestamp and there is no salt: the credential is fully determined by
//! its inputs.

use std::time::SystemTime;

use agorakit_models::{AppCertificate, AppId, ChannelName, ModelError, Role, Uid};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::TokenError;

/// Version bytes of the compact scheme.
pub const COMPACT_VERSION: [u8; 2] = [0x00, 0x02];

type HmacSha256 = Hmac<Sha256>;

fn push_field(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Builder for a compact token.
#[derive(Debug, Clone)]
pub struct CompactToken {
    app_id: AppId,
    channel: ChannelName,
    uid: Uid,
    role: Role,
    expire_at: u32,
}

impl CompactToken {
    /// Start a compact token valid for `expire_secs` seconds from now.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidExpiry`] when `expire_secs` is zero.
    pub fn new(
        app_id: AppId,
        channel: ChannelName,
        uid: Uid,
        role: Role,
        expire_secs: u32,
    ) -> Result<Self, TokenError> {
        if expire_secs == 0 {
            return Err(ModelError::InvalidExpiry.into());
        }
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("system clock before epoch")
            .as_secs() as u32;
        Ok(Self {
            app_id,
            channel,
            uid,
            role,
            expire_at: now.saturating_add(expire_secs),
        })
    }

    /// Pin the absolute expiry timestamp (unix seconds), making the
    /// credential reproducible.
    pub fn expires_at(mut self, ts: u32) -> Self {
        self.expire_at = ts;
        self
    }

    /// Sign with `certificate` and return the credential string.
    pub fn sign(&self, certificate: &AppCertificate) -> String {
        let mut body = Vec::with_capacity(64);
        body.extend_from_slice(&COMPACT_VERSION);
        push_field(&mut body, self.app_id.as_str());
        push_field(&mut body, self.channel.as_str());
        push_field(&mut body, &self.uid.to_string());
        body.extend_from_slice(&self.expire_at.to_be_bytes());
        body.push(self.role.wire_value());

        let mut mac = HmacSha256::new_from_slice(&certificate.as_raw_bytes())
            .expect("HMAC accepts any key size");
        mac.update(&body);
        let signature = mac.finalize().into_bytes();

        let mut out = Vec::with_capacity(signature.len() + body.len());
        out.extend_from_slice(&signature);
        out.extend_from_slice(&body);
        STANDARD.encode(out)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
