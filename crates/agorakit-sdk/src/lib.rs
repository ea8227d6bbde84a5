#![deny(missing_docs)]

//! # agorakit SDK
//!
//! Thin async wrapper over Agora's RESTful API: project listing and
//! creation, online-channel listing with usage, RTLS stream-key
//! provisioning, and the unauthenticated App ID probe. Authentication is
//! HTTP Basic with the account's Customer Key/Secret pair.
//!
//! Every operation is a single blocking-until-answered round-trip; remote
//! errors surface as [`SdkError::Api`] unchanged. Token signing lives in
//! `agorakit-token`, not here — stream keys are the one credential the
//! remote API mints.

pub mod client;
pub mod config;
pub mod console;
pub mod error;

pub use client::{probe_app_id, AgoraClient};
pub use config::{AgoraConfig, CustomerCredentials, DEFAULT_BASE_URL};
pub use error::SdkError;
