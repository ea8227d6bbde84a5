#![deny(missing_docs)]

//! # agorakit Token
//!
//! Local, deterministic signing of Agora credentials. Two schemes are
//! implemented, matching what Agora's servers accept:
//!
//! - [`access`] — the versioned `"007"` access token: salt, issue
//!   timestamp, validity and a privilege map, HMAC-SHA256 over the App
//!   Certificate text.
//! - [`compact`] — the legacy flat layout with an absolute expiry,
//!   HMAC-SHA256 over the hex-decoded certificate.
//!
//! Signing is pure once salt and timestamps are pinned; verification
//! happens on Agora's side and is out of scope.
//!
//! ```
//! use agorakit_models::{Role, Uid};
//! use agorakit_token::build_rtc_token;
//!
//! let token = build_rtc_token(
//!     "f76e8ace079b47deb51d9703a1ca925a".parse().unwrap(),
//!     &"5cfba27fd76c47a9a62572ee5a3dd1a2".parse().unwrap(),
//!     "clubCast1".parse().unwrap(),
//!     Uid::AUTO,
//!     Role::Subscriber,
//!     3600,
//! ).unwrap();
//! assert!(token.starts_with("007"));
//! ```

pub mod access;
pub mod compact;
pub mod error;
pub mod privilege;

pub use access::{build_rtc_token, AccessToken, RtcService, VERSION};
pub use compact::{CompactToken, COMPACT_VERSION};
pub use error::TokenError;
pub use privilege::Privilege;
