//! Axum router wiring.
//!
//! Every route runs behind the CSP filter. Paths other than `/healthz` are
//! dispatched on their selectors: report POSTs go to the violation receiver,
//! GET/HEAD render content.

use axum::{
    http::{Method, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use bytes::Bytes;

use cspfilter_core::REPORT_SELECTOR;

use crate::{app_state::AppState, content, filter, ops, path_info::RequestPathInfo, report};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .fallback(dispatch)
        .layer(middleware::from_fn_with_state(state.clone(), filter::csp_filter))
        .with_state(state)
}

async fn dispatch(method: Method, uri: Uri, nonce: filter::ScriptNonce, body: Bytes) -> Response {
    let info = RequestPathInfo::parse(uri.path());

    if info.has_selector(REPORT_SELECTOR) {
        if method == Method::POST {
            return report::receive_violation(uri, body).await.into_response();
        }
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    if method == Method::GET || method == Method::HEAD {
        return content::render_page(&info, &nonce).into_response();
    }

    StatusCode::METHOD_NOT_ALLOWED.into_response()
}
