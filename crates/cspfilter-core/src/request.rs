//! Per-request input to the engine.

/// Host-neutral description of one inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Resource path without selectors or extension, e.g. `/content/page`.
    pub resource_path: String,
    /// Selector segments in request order, e.g. `["frame"]`.
    pub selectors: Vec<String>,
    /// Extension of the request, e.g. `html`.
    pub extension: Option<String>,
    /// Machine-internal include rather than a client request.
    pub internal: bool,
}

impl RequestContext {
    pub fn new(resource_path: impl Into<String>) -> Self {
        Self {
            resource_path: resource_path.into(),
            ..Self::default()
        }
    }

    pub fn with_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn internal(mut self, internal: bool) -> Self {
        self.internal = internal;
        self
    }

    pub fn has_selector(&self, selector: &str) -> bool {
        self.selectors.iter().any(|s| s == selector)
    }
}
