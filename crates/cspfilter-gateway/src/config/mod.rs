//! Gateway config loader.
//!
//! The `version`/`gateway` sections are parsed strictly; the `csp` section is
//! a loose option map that defaults anything it cannot use.

pub mod schema;

use std::fs;
use std::path::Path;

use cspfilter_core::error::{CspError, Result};

pub use schema::{GatewayConfig, GatewaySection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| CspError::BadConfig(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| CspError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
