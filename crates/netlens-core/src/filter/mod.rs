mod host_matcher;
mod status_class;

pub use host_matcher::HostPattern;
pub use status_class::StatusClass;

use crate::model::RequestEntry;

/// Filter criteria for one view over captured requests
///
/// Every criterion is optional and an unset one places no constraint.
/// All set criteria are combined with AND logic - an entry must match
/// ALL of them to be included.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// HTTP method (exact, case-sensitive)
    pub method: Option<String>,
    /// Status class, one of 2xx..5xx
    pub status_class: Option<StatusClass>,
    /// Substring of the content type, parameters excluded
    pub content_type: Option<String>,
    /// Minimum response size in KiB; zero disables the check
    pub min_size_kb: f64,
    /// Request host patterns (any pattern matching = pass)
    pub hosts: Vec<HostPattern>,
}

impl FilterSpec {
    /// Create a new FilterSpec with default (no filtering)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set method filter; an empty method clears it
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        let method = method.into();
        self.method = (!method.is_empty()).then_some(method);
        self
    }

    /// Set status class filter from "2xx", "3xx", "4xx" or "5xx"; empty clears it
    pub fn with_status_class(mut self, pattern: &str) -> crate::Result<Self> {
        self.status_class = if pattern.trim().is_empty() {
            None
        } else {
            Some(pattern.parse()?)
        };
        Ok(self)
    }

    /// Set content type substring filter; empty clears it
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        self.content_type = (!content_type.is_empty()).then_some(content_type);
        self
    }

    /// Set minimum size in KiB; zero, negative and NaN clear it
    pub fn with_min_size_kb(mut self, min_size_kb: f64) -> Self {
        self.min_size_kb = if min_size_kb.is_finite() && min_size_kb > 0.0 {
            min_size_kb
        } else {
            0.0
        };
        self
    }

    /// Add host patterns from a list of pattern strings
    pub fn with_hosts(mut self, patterns: Vec<String>) -> crate::Result<Self> {
        for pattern in patterns {
            self.hosts.push(HostPattern::parse(&pattern)?);
        }
        Ok(self)
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.method.is_none()
            && self.status_class.is_none()
            && self.content_type.is_none()
            && self.min_size_kb <= 0.0
            && self.hosts.is_empty()
    }

    /// Check if an entry matches all filter criteria
    pub fn matches(&self, entry: &RequestEntry) -> bool {
        self.matches_method(entry)
            && self.matches_status(entry)
            && self.matches_content_type(entry)
            && self.matches_size(entry)
            && self.matches_host(entry)
    }

    fn matches_method(&self, entry: &RequestEntry) -> bool {
        match &self.method {
            None => true,
            Some(method) => entry.method == *method,
        }
    }

    fn matches_status(&self, entry: &RequestEntry) -> bool {
        match &self.status_class {
            None => true,
            Some(class) => class.matches(entry.status),
        }
    }

    fn matches_content_type(&self, entry: &RequestEntry) -> bool {
        match &self.content_type {
            None => true,
            // No content type never satisfies a content type filter
            Some(filter) => entry
                .media_type()
                .is_some_and(|media_type| media_type.contains(filter.as_str())),
        }
    }

    fn matches_size(&self, entry: &RequestEntry) -> bool {
        if self.min_size_kb <= 0.0 {
            return true;
        }
        entry.content_size as f64 >= self.min_size_kb * 1024.0
    }

    fn matches_host(&self, entry: &RequestEntry) -> bool {
        if self.hosts.is_empty() {
            return true;
        }
        self.hosts.iter().any(|pattern| pattern.matches_url(&entry.url))
    }
}

/// Filter entries against a spec.
///
/// Returns the matching entries in their original order. An empty result
/// is a valid outcome.
pub fn apply(entries: &[RequestEntry], spec: &FilterSpec) -> Vec<RequestEntry> {
    if spec.is_empty() {
        return entries.to_vec();
    }

    let filtered: Vec<RequestEntry> = entries
        .iter()
        .filter(|entry| spec.matches(entry))
        .cloned()
        .collect();

    tracing::debug!(
        "Filter matched {} of {} entries",
        filtered.len(),
        entries.len()
    );

    filtered
}
