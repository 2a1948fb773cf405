//! Policy configuration snapshot.
//!
//! A [`PolicyConfig`] is built once per configuration load and never mutated
//! afterwards; reconfiguration produces a new snapshot. Construction from a
//! loose option map never fails: absent or malformed options fall back to
//! their defaults (and malformed ones are logged).

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::warn;

use crate::keyword::Keyword;

pub const OPT_ENABLED: &str = "enabled";
pub const OPT_REPORT_ENABLED: &str = "report.enabled";
pub const OPT_REPORT_ONLY: &str = "report.only";
pub const OPT_MOZILLA_DIRECTIVES: &str = "directives.mozilla";
pub const OPT_REQUEST_PATH: &str = "request.path";
pub const OPT_FRAME_SELECTOR: &str = "selector.frame";
pub const OPT_CONNECT_SRC: &str = "directive.connect";
pub const OPT_DEFAULT_SRC: &str = "directive.default";
pub const OPT_SCRIPT_SRC: &str = "directive.script";
pub const OPT_STYLE_SRC: &str = "directive.style";
pub const OPT_IMG_SRC: &str = "directive.img";

const KNOWN_OPTIONS: [&str; 11] = [
    OPT_ENABLED,
    OPT_REPORT_ENABLED,
    OPT_REPORT_ONLY,
    OPT_MOZILLA_DIRECTIVES,
    OPT_REQUEST_PATH,
    OPT_FRAME_SELECTOR,
    OPT_CONNECT_SRC,
    OPT_DEFAULT_SRC,
    OPT_SCRIPT_SRC,
    OPT_STYLE_SRC,
    OPT_IMG_SRC,
];

/// Immutable CSP settings shared by all concurrent evaluations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    pub enabled: bool,
    pub report_enabled: bool,
    pub report_only: bool,
    /// Emit `frame-ancestors` alongside the sandbox directives.
    pub mozilla_directives: bool,
    /// Path prefixes the policy applies to (plain string prefixes).
    pub request_paths: BTreeSet<String>,
    /// Selector marking framed renderings. Blank disables frame detection.
    pub frame_selector: String,
    pub connect_src: Vec<String>,
    pub default_src: Vec<String>,
    pub script_src: Vec<String>,
    pub style_src: Vec<String>,
    pub img_src: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            report_enabled: true,
            report_only: false,
            mozilla_directives: true,
            request_paths: default_request_paths(),
            frame_selector: default_frame_selector(),
            connect_src: default_connect_src(),
            default_src: default_default_src(),
            script_src: default_script_src(),
            style_src: default_style_src(),
            img_src: default_img_src(),
        }
    }
}

impl PolicyConfig {
    /// Build a snapshot from named options, defaulting anything absent or malformed.
    pub fn from_options(opts: &Map<String, Value>) -> Self {
        for key in opts.keys() {
            if !KNOWN_OPTIONS.contains(&key.as_str()) {
                warn!(option = %key, "unknown csp option ignored");
            }
        }

        Self {
            enabled: bool_option(opts, OPT_ENABLED, true),
            report_enabled: bool_option(opts, OPT_REPORT_ENABLED, true),
            report_only: bool_option(opts, OPT_REPORT_ONLY, false),
            mozilla_directives: bool_option(opts, OPT_MOZILLA_DIRECTIVES, true),
            request_paths: path_option(opts, OPT_REQUEST_PATH),
            frame_selector: string_option(opts, OPT_FRAME_SELECTOR, default_frame_selector),
            connect_src: sources_option(opts, OPT_CONNECT_SRC, default_connect_src),
            default_src: sources_option(opts, OPT_DEFAULT_SRC, default_default_src),
            script_src: sources_option(opts, OPT_SCRIPT_SRC, default_script_src),
            style_src: sources_option(opts, OPT_STYLE_SRC, default_style_src),
            img_src: sources_option(opts, OPT_IMG_SRC, default_img_src),
        }
    }

    /// True when a non-blank frame selector is configured.
    pub fn frame_detection_enabled(&self) -> bool {
        !self.frame_selector.trim().is_empty()
    }
}

fn default_request_paths() -> BTreeSet<String> {
    BTreeSet::from(["/content".to_string()])
}
fn default_frame_selector() -> String {
    "frame".into()
}
fn default_connect_src() -> Vec<String> {
    vec![Keyword::SelfOrigin.source()]
}
fn default_default_src() -> Vec<String> {
    vec![Keyword::None.source()]
}
fn default_script_src() -> Vec<String> {
    vec![Keyword::SelfOrigin.source(), Keyword::UnsafeEval.source()]
}
fn default_style_src() -> Vec<String> {
    vec![Keyword::SelfOrigin.source()]
}
fn default_img_src() -> Vec<String> {
    vec!["*".into()]
}

fn bool_option(opts: &Map<String, Value>, key: &str, default: bool) -> bool {
    match opts.get(key) {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("true") => true,
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("false") => false,
        Some(other) => {
            warn!(option = key, value = %other, "malformed boolean option, using default");
            default
        }
    }
}

fn string_option(opts: &Map<String, Value>, key: &str, default: fn() -> String) -> String {
    match opts.get(key) {
        None | Some(Value::Null) => default(),
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Bool(_) | Value::Number(_))) => v.to_string(),
        Some(other) => {
            warn!(option = key, value = %other, "malformed string option, using default");
            default()
        }
    }
}

/// Flatten a scalar-or-sequence option into strings. `None` means malformed.
fn scalars(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Bool(_) | Value::Number(_) => Some(vec![value.to_string()]),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Null => {}
                    Value::String(s) => out.push(s.clone()),
                    Value::Bool(_) | Value::Number(_) => out.push(item.to_string()),
                    Value::Array(_) | Value::Object(_) => return None,
                }
            }
            Some(out)
        }
        Value::Null | Value::Object(_) => None,
    }
}

fn path_option(opts: &Map<String, Value>, key: &str) -> BTreeSet<String> {
    let Some(value) = opts.get(key).filter(|v| !v.is_null()) else {
        return default_request_paths();
    };
    match scalars(value) {
        Some(paths) => paths.into_iter().collect(),
        None => {
            warn!(option = key, value = %value, "malformed path list option, using default");
            default_request_paths()
        }
    }
}

/// Source tokens keep their configured order. Entries may hold several
/// tokens separated by commas or whitespace (`"'self', 'unsafe-eval'"`).
fn sources_option(opts: &Map<String, Value>, key: &str, default: fn() -> Vec<String>) -> Vec<String> {
    let Some(value) = opts.get(key).filter(|v| !v.is_null()) else {
        return default();
    };
    match scalars(value) {
        Some(entries) => entries.iter().flat_map(|e| split_tokens(e)).collect(),
        None => {
            warn!(option = key, value = %value, "malformed source list option, using default");
            default()
        }
    }
}

fn split_tokens(entry: &str) -> Vec<String> {
    entry
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tokens_handles_commas_and_spaces() {
        assert_eq!(split_tokens("'self', 'unsafe-eval'"), vec!["'self'", "'unsafe-eval'"]);
        assert_eq!(split_tokens("  *  "), vec!["*"]);
        assert!(split_tokens(" , ").is_empty());
    }

    #[test]
    fn scalars_rejects_nested_values() {
        assert!(scalars(&serde_json::json!([["a"]])).is_none());
        assert!(scalars(&serde_json::json!({"a": 1})).is_none());
        assert_eq!(scalars(&serde_json::json!([1, null, "x"])), Some(vec!["1".into(), "x".into()]));
    }

    #[test]
    fn blank_frame_selector_disables_detection() {
        let cfg = PolicyConfig { frame_selector: "  ".into(), ..PolicyConfig::default() };
        assert!(!cfg.frame_detection_enabled());
        assert!(PolicyConfig::default().frame_detection_enabled());
    }
}
