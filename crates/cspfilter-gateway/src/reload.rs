//! Policy reload.
//!
//! A reload re-reads the config file and swaps in a fresh snapshot. Invalid
//! configuration keeps the old snapshot and logs a warning. On Unix a SIGHUP
//! triggers a reload (`kill -HUP <pid>`).

use std::path::Path;

use tracing::{info, warn};

use cspfilter_core::error::Result;

use crate::app_state::AppState;
use crate::config;

pub fn reload_from_file(state: &AppState, path: &Path) -> Result<()> {
    let cfg = config::load_from_file(path)?;
    let policy = cfg.policy();
    info!(
        path = %path.display(),
        enabled = policy.enabled,
        report_only = policy.report_only,
        "csp policy reloaded"
    );
    state.replace_policy(policy);
    Ok(())
}

/// Reload from the state's config path on every SIGHUP.
#[cfg(unix)]
pub fn start_sighup_handler(state: AppState) {
    use tokio::signal::unix::{signal, SignalKind};

    let Some(path) = state.config_path().map(Path::to_path_buf) else {
        warn!("no config path; SIGHUP reload disabled");
        return;
    };

    tokio::spawn(async move {
        let mut sig = match signal(SignalKind::hangup()) {
            Ok(sig) => sig,
            Err(e) => {
                warn!(error = %e, "failed to register SIGHUP handler; reload disabled");
                return;
            }
        };
        while sig.recv().await.is_some() {
            info!("SIGHUP received, reloading csp policy");
            if let Err(e) = reload_from_file(&state, &path) {
                warn!(code = e.code().as_str(), error = %e, "csp reload failed (keeping old policy)");
            }
        }
    });
}

#[cfg(not(unix))]
pub fn start_sighup_handler(_state: AppState) {}
