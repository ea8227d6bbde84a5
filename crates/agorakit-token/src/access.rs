//! Versioned access-token signing.
//!
//! Builds the `"007"`-prefixed credential: a binary body carrying a random
//! salt, the issue timestamp, the validity period and a per-service
//! privilege map, authenticated with HMAC-SHA256 keyed by the App
//! Certificate and base64-encoded next to the signature:
//!
//! ```text
//! packed  = u32 salt | u32 issue_ts | u32 expire | u16 count | services…
//! token   = "007" || app_id || base64(hmac(cert, app_id || packed)) || base64(packed)
//! ```
//!
//! All integers are big-endian; base64 is the standard alphabet with
//! padding, as the published scheme requires.

use std::collections::BTreeMap;
use std::time::SystemTime;

use agorakit_models::{AppCertificate, AppId, ChannelName, ModelError, Role, Uid};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::error::TokenError;
use crate::privilege::Privilege;

/// Version prefix of the signed credential.
pub const VERSION: &str = "007";

/// Wire identifier of the RTC service block.
const SERVICE_TYPE_RTC: u16 = 1;

type HmacSha256 = Hmac<Sha256>;

// ---------------------------------------------------------------------------
// Byte packing
// ---------------------------------------------------------------------------

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// u16 length prefix + raw bytes. Lengths are bounded well below u16::MAX
/// by `ChannelName` validation and the decimal form of a u32.
fn push_str(buf: &mut Vec<u8>, s: &str) {
    push_u16(buf, s.len() as u16);
    buf.extend_from_slice(s.as_bytes());
}

// ---------------------------------------------------------------------------
// RtcService
// ---------------------------------------------------------------------------

/// The RTC service block of an access token: a channel, a uid, and the
/// privileges granted on them.
///
/// Privileges are kept ordered by wire value so packing is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtcService {
    channel: ChannelName,
    uid: Uid,
    privileges: BTreeMap<u16, u32>,
}

impl RtcService {
    /// Create an empty service block for `channel` / `uid`.
    pub fn new(channel: ChannelName, uid: Uid) -> Self {
        Self {
            channel,
            uid,
            privileges: BTreeMap::new(),
        }
    }

    /// Create a service block carrying the privilege set for `role`.
    ///
    /// A [`Role::Publisher`] gets join plus audio/video/data publishing;
    /// a [`Role::Subscriber`] gets join only. Every privilege expires
    /// after `expire_secs`.
    pub fn for_role(channel: ChannelName, uid: Uid, role: Role, expire_secs: u32) -> Self {
        let mut svc = Self::new(channel, uid);
        svc.add_privilege(Privilege::JoinChannel, expire_secs);
        if role == Role::Publisher {
            svc.add_privilege(Privilege::PublishAudioStream, expire_secs);
            svc.add_privilege(Privilege::PublishVideoStream, expire_secs);
            svc.add_privilege(Privilege::PublishDataStream, expire_secs);
        }
        svc
    }

    /// Grant `privilege` with its own expiration (seconds).
    pub fn add_privilege(&mut self, privilege: Privilege, expire_secs: u32) {
        self.privileges.insert(privilege.wire_value(), expire_secs);
    }

    /// Number of privileges granted.
    pub fn privilege_count(&self) -> usize {
        self.privileges.len()
    }

    /// Append the packed service block:
    /// `u16 type | u16 count | (u16 privilege, u32 expire)* | channel | uid`.
    ///
    /// [`Uid::AUTO`] (uid 0, let the service assign one) packs as an empty
    /// string, not `"0"`; any other uid packs in decimal.
    fn pack(&self, buf: &mut Vec<u8>) {
        push_u16(buf, SERVICE_TYPE_RTC);
        push_u16(buf, self.privileges.len() as u16);
        for (privilege, expire) in &self.privileges {
            push_u16(buf, *privilege);
            push_u32(buf, *expire);
        }
        push_str(buf, self.channel.as_str());
        if self.uid.value() == 0 {
            push_str(buf, "");
        } else {
            push_str(buf, &self.uid.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// AccessToken
// ---------------------------------------------------------------------------

/// Builder for a versioned access token.
///
/// Salt and issue timestamp default to a fresh random value and the
/// current time; both can be pinned, after which signing the same inputs
/// yields a byte-identical credential.
#[derive(Debug, Clone)]
pub struct AccessToken {
    app_id: AppId,
    issue_ts: u32,
    expire: u32,
    salt: u32,
    services: Vec<RtcService>,
}

impl AccessToken {
    /// Start a token for `app_id`, valid for `expire_secs` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidExpiry`] when `expire_secs` is zero.
    pub fn new(app_id: AppId, expire_secs: u32) -> Result<Self, TokenError> {
        if expire_secs == 0 {
            return Err(ModelError::InvalidExpiry.into());
        }
        Ok(Self {
            app_id,
            issue_ts: unix_now(),
            expire: expire_secs,
            salt: rand::thread_rng().gen_range(1..=99_999_999),
            services: Vec::new(),
        })
    }

    /// Pin the issue timestamp (unix seconds).
    pub fn issued_at(mut self, ts: u32) -> Self {
        self.issue_ts = ts;
        self
    }

    /// Pin the salt. Any value is as valid as any other; pinning it makes
    /// the credential reproducible.
    pub fn with_salt(mut self, salt: u32) -> Self {
        self.salt = salt;
        self
    }

    /// Attach a service block.
    pub fn add_service(mut self, service: RtcService) -> Self {
        self.services.push(service);
        self
    }

    /// Sign the token with `certificate` and return the credential string.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::NoServices`] when no service was attached.
    pub fn sign(&self, certificate: &AppCertificate) -> Result<String, TokenError> {
        if self.services.is_empty() {
            return Err(TokenError::NoServices);
        }

        let mut packed = Vec::with_capacity(64);
        push_u32(&mut packed, self.salt);
        push_u32(&mut packed, self.issue_ts);
        push_u32(&mut packed, self.expire);
        push_u16(&mut packed, self.services.len() as u16);
        for service in &self.services {
            service.pack(&mut packed);
        }

        let mut mac = HmacSha256::new_from_slice(certificate.as_str().as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(self.app_id.as_str().as_bytes());
        mac.update(&packed);
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{VERSION}{}{}{}",
            self.app_id,
            STANDARD.encode(signature),
            STANDARD.encode(&packed)
        ))
    }
}

/// Build a ready-to-use RTC join token in one call.
///
/// Attaches the privilege set for `role` and signs immediately; salt and
/// issue time are fresh, so two calls yield different (equally valid)
/// credentials.
pub fn build_rtc_token(
    app_id: AppId,
    certificate: &AppCertificate,
    channel: ChannelName,
    uid: Uid,
    role: Role,
    expire_secs: u32,
) -> Result<String, TokenError> {
    AccessToken::new(app_id, expire_secs)?
        .add_service(RtcService::for_role(channel, uid, role, expire_secs))
        .sign(certificate)
}

fn unix_now() -> u32 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .expect("system clock before epoch")
        .as_secs() as u32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const APP_ID: &str = "f76e8ace079b47deb51d9703a1ca925a";
    const CERT: &str = "5cfba27fd76c47a9a62572ee5a3dd1a2";

    fn app_id() -> AppId {
        APP_ID.parse().unwrap()
    }

    fn cert() -> AppCertificate {
        CERT.parse().unwrap()
    }

    fn channel() -> ChannelName {
        "clubCast1".parse().unwrap()
    }

    fn pinned_token(role: Role) -> String {
        AccessToken::new(app_id(), 3600)
            .unwrap()
            .issued_at(1_700_000_000)
            .with_salt(42_4242)
            .add_service(RtcService::for_role(channel(), Uid(0), role, 3600))
            .sign(&cert())
            .unwrap()
    }

    /// Split a credential into (signature bytes, packed body bytes).
    ///
    /// base64 of the 32-byte signature is exactly 44 characters, so the
    /// concatenated encoding splits at a fixed offset.
    fn decode(token: &str) -> (Vec<u8>, Vec<u8>) {
        let rest = &token[VERSION.len() + APP_ID.len()..];
        let (sig_b64, body_b64) = rest.split_at(44);
        (
            STANDARD.decode(sig_b64).unwrap(),
            STANDARD.decode(body_b64).unwrap(),
        )
    }

    #[test]
    fn token_starts_with_version_and_app_id() {
        let token = pinned_token(Role::Subscriber);
        assert!(token.starts_with(&format!("007{APP_ID}")));
    }

    #[test]
    fn same_inputs_same_salt_identical_credential() {
        assert_eq!(pinned_token(Role::Publisher), pinned_token(Role::Publisher));
    }

    #[test]
    fn different_salts_different_credentials() {
        let base = AccessToken::new(app_id(), 3600)
            .unwrap()
            .issued_at(1_700_000_000)
            .add_service(RtcService::for_role(channel(), Uid(0), Role::Publisher, 3600));
        let a = base.clone().with_salt(1).sign(&cert()).unwrap();
        let b = base.with_salt(2).sign(&cert()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn publisher_and_subscriber_tokens_differ() {
        let publisher = pinned_token(Role::Publisher);
        let subscriber = pinned_token(Role::Subscriber);
        assert!(!publisher.is_empty());
        assert!(!subscriber.is_empty());
        assert_ne!(publisher, subscriber);
    }

    #[test]
    fn changing_any_field_changes_the_credential() {
        let reference = pinned_token(Role::Publisher);

        let other_channel = AccessToken::new(app_id(), 3600)
            .unwrap()
            .issued_at(1_700_000_000)
            .with_salt(42_4242)
            .add_service(RtcService::for_role(
                "clubCast2".parse().unwrap(),
                Uid(0),
                Role::Publisher,
                3600,
            ))
            .sign(&cert())
            .unwrap();
        assert_ne!(reference, other_channel);

        let other_uid = AccessToken::new(app_id(), 3600)
            .unwrap()
            .issued_at(1_700_000_000)
            .with_salt(42_4242)
            .add_service(RtcService::for_role(channel(), Uid(7), Role::Publisher, 3600))
            .sign(&cert())
            .unwrap();
        assert_ne!(reference, other_uid);

        let other_expire = AccessToken::new(app_id(), 7200)
            .unwrap()
            .issued_at(1_700_000_000)
            .with_salt(42_4242)
            .add_service(RtcService::for_role(channel(), Uid(0), Role::Publisher, 7200))
            .sign(&cert())
            .unwrap();
        assert_ne!(reference, other_expire);
    }

    #[test]
    fn zero_expiry_is_rejected() {
        let err = AccessToken::new(app_id(), 0).unwrap_err();
        assert_eq!(err, TokenError::Model(ModelError::InvalidExpiry));
    }

    #[test]
    fn signing_without_services_is_rejected() {
        let err = AccessToken::new(app_id(), 3600)
            .unwrap()
            .sign(&cert())
            .unwrap_err();
        assert_eq!(err, TokenError::NoServices);
    }

    #[test]
    fn packed_body_layout() {
        let token = pinned_token(Role::Subscriber);
        let (_, body) = decode(&token);

        // salt | issue_ts | expire | service count
        assert_eq!(&body[0..4], &424_242u32.to_be_bytes());
        assert_eq!(&body[4..8], &1_700_000_000u32.to_be_bytes());
        assert_eq!(&body[8..12], &3600u32.to_be_bytes());
        assert_eq!(&body[12..14], &1u16.to_be_bytes());

        // RTC service: type 1, one privilege (join), expiring with the token
        assert_eq!(&body[14..16], &1u16.to_be_bytes());
        assert_eq!(&body[16..18], &1u16.to_be_bytes());
        assert_eq!(&body[18..20], &1u16.to_be_bytes());
        assert_eq!(&body[20..24], &3600u32.to_be_bytes());

        // channel name, then the uid string (empty for uid 0)
        assert_eq!(&body[24..26], &9u16.to_be_bytes());
        assert_eq!(&body[26..35], b"clubCast1");
        assert_eq!(&body[35..37], &0u16.to_be_bytes());
        assert_eq!(body.len(), 37);
    }

    #[test]
    fn uid_zero_matches_published_credential() {
        // Ground truth produced by the reference signer for uid 0 with the
        // pinned salt and issue time. uid 0 must pack as a zero-length
        // string; packing "0" changes the body and the HMAC with it.
        let token = pinned_token(Role::Subscriber);
        assert_eq!(
            token,
            "007f76e8ace079b47deb51d9703a1ca925a\
             QyDaJTgs4Rhjq69ucaIsh2XX/zY2F4X6BkLvcGbS+wo=\
             AAZ5MmVT8QAAAA4QAAEAAQABAAEAAA4QAAljbHViQ2FzdDEAAA=="
        );

        let publisher = pinned_token(Role::Publisher);
        assert_eq!(
            publisher,
            "007f76e8ace079b47deb51d9703a1ca925a\
             Yy2d0xprgb8VdiqgCUUzBVk9sikYUL0i7dBJde0D62I=\
             AAZ5MmVT8QAAAA4QAAEAAQAEAAEAAA4QAAIAAA4QAAMAAA4QAAQAAA4QAAljbHViQ2FzdDEAAA=="
        );
    }

    #[test]
    fn nonzero_uid_packs_as_decimal_string() {
        let token = AccessToken::new(app_id(), 3600)
            .unwrap()
            .issued_at(1_700_000_000)
            .with_salt(42_4242)
            .add_service(RtcService::for_role(channel(), Uid(12345), Role::Subscriber, 3600))
            .sign(&cert())
            .unwrap();
        let (_, body) = decode(&token);
        assert_eq!(&body[35..37], &5u16.to_be_bytes());
        assert_eq!(&body[37..42], b"12345");
        assert_eq!(body.len(), 42);
    }

    #[test]
    fn signature_verifies_against_certificate() {
        let token = pinned_token(Role::Publisher);
        let (signature, body) = decode(&token);

        let mut mac = HmacSha256::new_from_slice(CERT.as_bytes()).unwrap();
        mac.update(APP_ID.as_bytes());
        mac.update(&body);
        assert_eq!(signature, mac.finalize().into_bytes().to_vec());
    }

    #[test]
    fn publisher_grants_four_privileges() {
        let svc = RtcService::for_role(channel(), Uid(0), Role::Publisher, 60);
        assert_eq!(svc.privilege_count(), 4);
        let svc = RtcService::for_role(channel(), Uid(0), Role::Subscriber, 60);
        assert_eq!(svc.privilege_count(), 1);
    }

    #[test]
    fn fresh_salts_make_distinct_but_prefixed_tokens() {
        let a = build_rtc_token(app_id(), &cert(), channel(), Uid(0), Role::Publisher, 3600)
            .unwrap();
        let b = build_rtc_token(app_id(), &cert(), channel(), Uid(0), Role::Publisher, 3600)
            .unwrap();
        assert!(a.starts_with("007"));
        // Salt (and possibly issue time) differ, so the credentials do too.
        assert_ne!(a, b);
    }
}
