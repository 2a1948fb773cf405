//! Top-level facade crate for cspfilter.
//!
//! Re-exports the policy engine and the axum gateway so users can depend on a single crate.

pub mod core {
    pub use cspfilter_core::*;
}

pub mod gateway {
    pub use cspfilter_gateway::*;
}
