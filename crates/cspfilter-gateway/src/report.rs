//! Violation report receiver.
//!
//! Browsers POST violation reports to `<resource>.csp_violation.<ext>`. The
//! receiver only logs what it gets and acknowledges; reports are not stored.

use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

pub const ACK_BODY: &str = "violation reported";

#[derive(Debug, Deserialize)]
struct ReportEnvelope {
    #[serde(rename = "csp-report")]
    report: ViolationReport,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ViolationReport {
    document_uri: Option<String>,
    violated_directive: Option<String>,
    blocked_uri: Option<String>,
}

pub async fn receive_violation(uri: Uri, body: Bytes) -> impl IntoResponse {
    match serde_json::from_slice::<ReportEnvelope>(&body) {
        Ok(ReportEnvelope { report }) => info!(
            path = uri.path(),
            document_uri = report.document_uri.as_deref().unwrap_or("-"),
            violated_directive = report.violated_directive.as_deref().unwrap_or("-"),
            blocked_uri = report.blocked_uri.as_deref().unwrap_or("-"),
            "csp violation reported"
        ),
        Err(_) => info!(
            path = uri.path(),
            bytes = body.len(),
            body = %String::from_utf8_lossy(&body),
            "csp violation reported (unstructured)"
        ),
    }

    (StatusCode::OK, ACK_BODY)
}
