//! cspfilter core: Content-Security-Policy assembly and request matching.
//!
//! This crate turns an immutable [`PolicyConfig`] snapshot and a per-request
//! [`RequestContext`] into a [`PolicyDecision`]: whether the policy applies,
//! which header names to set, the assembled policy string and a fresh script
//! nonce. It carries no HTTP or runtime dependencies; host adapters translate
//! decisions into real header writes.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! The only fallible step is building the nonce source at startup, which
//! surfaces as `CspError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod engine;
pub mod error;
pub mod keyword;
pub mod nonce;
pub mod request;

pub use config::PolicyConfig;
pub use engine::{PolicyDecision, PolicyEngine, REPORT_SELECTOR, SCRIPT_NONCE_ATTRIBUTE};
/// Shared result type.
pub use error::{CspError, Result};
pub use keyword::Keyword;
pub use nonce::NonceGenerator;
pub use request::RequestContext;
