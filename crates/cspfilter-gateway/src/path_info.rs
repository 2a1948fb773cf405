//! Request path decomposition.
//!
//! The last path segment carries the resource name, selectors and extension
//! separated by dots:
//!
//! ```text
//! /content/site/page.frame.print.html
//! └─ resource ─────┘ └ selectors ┘ └ ext
//! ```
//!
//! Suffix paths after the extension are not supported; a trailing slash
//! keeps the whole path as the resource.

use cspfilter_core::RequestContext;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPathInfo {
    pub resource_path: String,
    pub selectors: Vec<String>,
    pub extension: Option<String>,
}

impl RequestPathInfo {
    pub fn parse(path: &str) -> Self {
        let (dir, last) = match path.rfind('/') {
            Some(i) => path.split_at(i + 1),
            None => ("", path),
        };

        let mut parts = last.split('.');
        let name = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        let (selectors, extension) = match rest.split_last() {
            Some((ext, selectors)) => (
                selectors
                    .iter()
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string())
                    .collect(),
                Some(ext.to_string()).filter(|e| !e.is_empty()),
            ),
            None => (Vec::new(), None),
        };

        Self {
            resource_path: format!("{dir}{name}"),
            selectors,
            extension,
        }
    }

    pub fn has_selector(&self, selector: &str) -> bool {
        self.selectors.iter().any(|s| s == selector)
    }

    pub fn into_context(self, internal: bool) -> RequestContext {
        RequestContext {
            resource_path: self.resource_path,
            selectors: self.selectors,
            extension: self.extension,
            internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_resource_with_extension() {
        let info = RequestPathInfo::parse("/content/page.html");
        assert_eq!(info.resource_path, "/content/page");
        assert!(info.selectors.is_empty());
        assert_eq!(info.extension.as_deref(), Some("html"));
    }

    #[test]
    fn selectors_sit_between_name_and_extension() {
        let info = RequestPathInfo::parse("/content/page.frame.print.html");
        assert_eq!(info.resource_path, "/content/page");
        assert_eq!(info.selectors, ["frame", "print"]);
        assert_eq!(info.extension.as_deref(), Some("html"));
    }

    #[test]
    fn dots_in_parent_segments_are_kept() {
        let info = RequestPathInfo::parse("/content/v1.2/page.json");
        assert_eq!(info.resource_path, "/content/v1.2/page");
        assert_eq!(info.extension.as_deref(), Some("json"));
    }

    #[test]
    fn no_extension() {
        let info = RequestPathInfo::parse("/content/page");
        assert_eq!(info.resource_path, "/content/page");
        assert_eq!(info.extension, None);

        let info = RequestPathInfo::parse("/content/");
        assert_eq!(info.resource_path, "/content/");
        assert_eq!(info.extension, None);
    }

    #[test]
    fn report_path_round_trips_through_parse() {
        let info = RequestPathInfo::parse("/content/page.csp_violation.html");
        assert_eq!(info.resource_path, "/content/page");
        assert!(info.has_selector("csp_violation"));
    }

    #[test]
    fn empty_selectors_are_dropped() {
        let info = RequestPathInfo::parse("/content/page..frame.html");
        assert_eq!(info.selectors, ["frame"]);
    }
}
