//! cspfilter gateway library entry.
//!
//! Hosts the CSP engine inside an axum application: config loading and
//! reload, the filter middleware that applies each decision, the violation
//! report receiver, and a minimal content handler that consumes the script
//! nonce. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod content;
pub mod filter;
pub mod ops;
pub mod path_info;
pub mod reload;
pub mod report;
pub mod router;
