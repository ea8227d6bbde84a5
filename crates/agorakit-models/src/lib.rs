#![deny(missing_docs)]

//! # agorakit Models
//!
//! Core data types shared by the agorakit crates: validated identity
//! newtypes, channel addressing, roles, and the project/channel records
//! returned by Agora's RESTful API.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`app`] | `AppId` (public project id), `AppCertificate` (signing secret) |
//! | [`channel`] | `ChannelName`, `Uid` |
//! | [`role`] | `Role` (publisher/subscriber), `Region` (REST endpoint region) |
//! | [`project`] | REST records: `Project`, `ChannelInfo`, `AppIdStatus` |
//! | [`error`] | `ModelError` |
//!
//! Every constructor validates; a value of one of these types is known
//! well-formed, so the signer and REST client never re-check formats.

pub mod app;
pub mod channel;
pub mod error;
pub mod project;
pub mod role;

// Re-export all public types at crate root for convenience.
pub use app::*;
pub use channel::*;
pub use error::*;
pub use project::*;
pub use role::*;
