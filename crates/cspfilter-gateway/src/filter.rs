//! CSP filter middleware.
//!
//! Runs once per request ahead of every handler: evaluates the engine against
//! the current policy snapshot, exposes the script nonce to handlers through
//! request extensions, and writes the CSP headers onto the response when the
//! decision applies.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use cspfilter_core::SCRIPT_NONCE_ATTRIBUTE;

use crate::app_state::AppState;
use crate::path_info::RequestPathInfo;

/// Marks a request as a server-side include. The filter leaves such
/// requests untouched so includes never receive policy headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubRequest;

/// Per-request script nonce for `<script nonce="...">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptNonce(pub String);

impl ScriptNonce {
    pub const ATTRIBUTE: &'static str = SCRIPT_NONCE_ATTRIBUTE;

    pub fn value(&self) -> &str {
        &self.0
    }
}

pub async fn csp_filter(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let internal = req.extensions().get::<SubRequest>().is_some();
    let ctx = RequestPathInfo::parse(req.uri().path()).into_context(internal);

    let policy = state.policy();
    let decision = state.engine().evaluate(&policy, &ctx);

    if let Some(nonce) = &decision.nonce {
        req.extensions_mut().insert(ScriptNonce(nonce.clone()));
    }

    let mut response = next.run(req).await;

    for (name, value) in decision.headers() {
        let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) else {
            warn!(header = name, path = %ctx.resource_path, "csp header not representable; skipped");
            continue;
        };
        response.headers_mut().insert(name, value);
    }

    response
}

#[async_trait]
impl<S> FromRequestParts<S> for ScriptNonce
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_else(|| {
            warn!(
                attribute = Self::ATTRIBUTE,
                "script nonce missing from request; csp filter not applied"
            );
            Self(String::new())
        }))
    }
}
