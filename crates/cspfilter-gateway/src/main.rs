//! cspfilter gateway binary.
//!
//! - Config: YAML file from `CSPFILTER_CONFIG` (default `cspfilter.yaml`)
//! - Reload: SIGHUP re-reads the file and swaps the policy snapshot
//! - Fails closed: no serving when the nonce source cannot be built

use std::path::PathBuf;
use std::process;

use tracing_subscriber::{fmt, EnvFilter};

use cspfilter_gateway::{app_state::AppState, config, reload, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = PathBuf::from(
        std::env::var("CSPFILTER_CONFIG").unwrap_or_else(|_| "cspfilter.yaml".to_string()),
    );

    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "config load failed");
            process::exit(1);
        }
    };
    let listen = match cfg.gateway.listen_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "invalid listen address");
            process::exit(1);
        }
    };

    let state = match AppState::new(cfg.policy(), Some(path)) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "csp filter refused to activate");
            process::exit(1);
        }
    };
    reload::start_sighup_handler(state.clone());

    let app = router::build_router(state);

    tracing::info!(%listen, "cspfilter-gateway starting");
    let listener = match tokio::net::TcpListener::bind(listen).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%listen, error = %e, "failed to bind");
            process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        process::exit(1);
    }
}
