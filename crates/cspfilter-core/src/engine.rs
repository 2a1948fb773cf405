//! Policy evaluation.
//!
//! [`PolicyEngine::evaluate`] is the single entry point used per request:
//!
//! 1. gate on `enabled` and internal includes (no work at all when gated)
//! 2. pick the header names (enforcing or report-only)
//! 3. assemble the directive string, plus sandbox directives for framed requests
//! 4. match the resource path against the configured prefixes
//! 5. draw a fresh script nonce
//!
//! The nonce is produced even when the path is out of scope; callers decide
//! whether to expose it.

use tracing::debug;

use crate::config::PolicyConfig;
use crate::nonce::NonceGenerator;
use crate::request::RequestContext;

/// Selector routing browser violation reports to the report receiver.
pub const REPORT_SELECTOR: &str = "csp_violation";

/// Request attribute key under which hosts expose the script nonce.
pub const SCRIPT_NONCE_ATTRIBUTE: &str = "CSP_SCRIPT_NONCE";

const ENFORCING_HEADERS: [&str; 3] = [
    "Content-Security-Policy",
    "X-Content-Security-Policy",
    "X-WebKit-CSP",
];

const REPORT_ONLY_HEADERS: [&str; 3] = [
    "Content-Security-Policy-Report-Only",
    "X-Content-Security-Policy-Report-Only",
    "X-WebKit-CSP-Report-Only",
];

const FRAME_DIRECTIVES: &str = "frame-src 'self';sandbox";
const MOZILLA_FRAME_DIRECTIVES: &str = "frame-ancestors 'self'";

/// Outcome of one evaluation. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDecision {
    /// Whether the host should write the headers.
    pub apply: bool,
    pub header_names: &'static [&'static str],
    pub policy: String,
    pub nonce: Option<String>,
}

impl PolicyDecision {
    /// Decision for disabled filters and internal includes.
    pub fn skip() -> Self {
        Self {
            apply: false,
            header_names: &[],
            policy: String::new(),
            nonce: None,
        }
    }

    /// `(name, value)` pairs to set; empty unless `apply`.
    pub fn headers(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        let names: &'static [&'static str] = if self.apply { self.header_names } else { &[] };
        names.iter().map(move |name| (*name, self.policy.as_str()))
    }
}

/// Header names for the given mode, vendor-prefixed variants included.
pub fn header_names(report_only: bool) -> &'static [&'static str] {
    if report_only {
        &REPORT_ONLY_HEADERS
    } else {
        &ENFORCING_HEADERS
    }
}

/// Request-scoped CSP evaluation. Holds only the nonce source, so one
/// instance is shared by every request and every config snapshot.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    nonces: NonceGenerator,
}

impl PolicyEngine {
    pub fn new(nonces: NonceGenerator) -> Self {
        Self { nonces }
    }

    pub fn evaluate(&self, config: &PolicyConfig, req: &RequestContext) -> PolicyDecision {
        if !config.enabled || req.internal {
            return PolicyDecision::skip();
        }

        let header_names = header_names(config.report_only);
        let policy = assemble_policy(config, req);
        let apply = in_scope(config, &req.resource_path);
        let nonce = self.nonces.generate();

        debug!(path = %req.resource_path, apply, report_only = config.report_only, "csp evaluated");

        PolicyDecision {
            apply,
            header_names,
            policy,
            nonce: Some(nonce),
        }
    }
}

/// Directive string for `req`, sandbox directives included when framed.
pub fn assemble_policy(config: &PolicyConfig, req: &RequestContext) -> String {
    let mut directives = vec![
        directive("connect-src", &config.connect_src),
        directive("default-src", &config.default_src),
        directive("script-src", &config.script_src),
        directive("style-src", &config.style_src),
        directive("img-src", &config.img_src),
    ];
    if config.report_enabled || config.report_only {
        directives.push(format!("report-uri {}", report_uri(req)));
    }

    let mut policy = directives.join(";");
    if is_frame(config, req) {
        policy.push(';');
        policy.push_str(FRAME_DIRECTIVES);
        if config.mozilla_directives {
            policy.push(';');
            policy.push_str(MOZILLA_FRAME_DIRECTIVES);
        }
    }
    policy
}

/// An empty source list renders the bare directive name, which browsers
/// read as `'none'`.
fn directive(name: &str, sources: &[String]) -> String {
    if sources.is_empty() {
        return name.to_string();
    }
    format!("{name} {}", sources.join(" "))
}

/// `<resource>.csp_violation.<ext>`; the trailing `.<ext>` is dropped when
/// the request has no extension.
pub fn report_uri(req: &RequestContext) -> String {
    match req.extension.as_deref().filter(|e| !e.is_empty()) {
        Some(ext) => format!("{}.{REPORT_SELECTOR}.{ext}", req.resource_path),
        None => format!("{}.{REPORT_SELECTOR}", req.resource_path),
    }
}

pub fn is_frame(config: &PolicyConfig, req: &RequestContext) -> bool {
    config.frame_detection_enabled() && req.has_selector(&config.frame_selector)
}

/// Plain string-prefix match, not segment aware: `/content` also covers
/// `/contentfoo`.
pub fn in_scope(config: &PolicyConfig, resource_path: &str) -> bool {
    config
        .request_paths
        .iter()
        .any(|prefix| resource_path.starts_with(prefix.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sources_render_bare_directive() {
        assert_eq!(directive("default-src", &[]), "default-src");
        assert_eq!(directive("img-src", &["*".to_string()]), "img-src *");
    }

    #[test]
    fn report_uri_without_extension() {
        let req = RequestContext::new("/content/page");
        assert_eq!(report_uri(&req), "/content/page.csp_violation");
    }

    #[test]
    fn prefix_match_is_not_segment_aware() {
        let cfg = PolicyConfig::default();
        assert!(in_scope(&cfg, "/content"));
        assert!(in_scope(&cfg, "/contentfoo/x"));
        assert!(!in_scope(&cfg, "/cont"));
    }

    #[test]
    fn skipped_decision_yields_no_headers() {
        let decision = PolicyDecision {
            apply: false,
            header_names: header_names(false),
            policy: "default-src 'none'".into(),
            nonce: None,
        };
        assert_eq!(decision.headers().count(), 0);
        assert_eq!(PolicyDecision::skip().headers().count(), 0);
    }
}
