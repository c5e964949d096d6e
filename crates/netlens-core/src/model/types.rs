use super::de;
use crate::filter::StatusClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder shown for a request without a content type
pub const NO_CONTENT_TYPE: &str = "N/A";

/// Placeholder shown for a request without a body
pub const NO_POST_DATA: &str = "No post data";

/// Outcome of analyzing one URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
}

/// One analyzed URL, as returned by the capture service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub url: String,
    pub status: ResultStatus,
    #[serde(
        rename = "error",
        alias = "errorMessage",
        alias = "error_message",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_message: Option<String>,
    /// Requests in capture order
    #[serde(
        rename = "data",
        alias = "entries",
        default,
        deserialize_with = "de::null_as_default"
    )]
    pub entries: Vec<RequestEntry>,
    #[serde(
        rename = "page_metrics",
        alias = "pageMetrics",
        default,
        deserialize_with = "de::null_as_default"
    )]
    pub page_metrics: PageMetrics,
}

impl AnalysisResult {
    /// Build a successful result
    pub fn success(url: impl Into<String>, entries: Vec<RequestEntry>, page_metrics: PageMetrics) -> Self {
        Self {
            url: url.into(),
            status: ResultStatus::Success,
            error_message: None,
            entries,
            page_metrics,
        }
    }

    /// Build a failed result
    pub fn failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: ResultStatus::Error,
            error_message: Some(message.into()),
            entries: Vec::new(),
            page_metrics: PageMetrics::default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }
}

/// Page-wide totals reported by the capture service.
///
/// These are the baseline for the whole page and are not adjusted when a
/// filtered view shows fewer requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    #[serde(alias = "totalSize", default, deserialize_with = "de::byte_count")]
    pub total_size: u64,
    #[serde(alias = "totalLoadTime", default, deserialize_with = "de::millis")]
    pub total_load_time: f64,
    #[serde(
        alias = "requestCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_count: Option<usize>,
}

impl PageMetrics {
    /// Recompute page metrics from a capture, given the measured load time
    pub fn from_entries(entries: &[RequestEntry], total_load_time: f64) -> Self {
        Self {
            total_size: entries.iter().map(|e| e.content_size).sum(),
            total_load_time,
            request_count: Some(entries.len()),
        }
    }
}

/// One captured request/response pair in a page-load waterfall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEntry {
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub status: u16,
    /// Raw header value, possibly with parameters after `;`
    #[serde(
        alias = "contentType",
        alias = "mimeType",
        default,
        deserialize_with = "de::content_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,
    #[serde(alias = "contentSize", default, deserialize_with = "de::byte_count")]
    pub content_size: u64,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub timing: Timing,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub request: RequestDetails,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub response: ResponseDetails,
}

impl RequestEntry {
    /// Create an entry with empty headers and zero timings
    pub fn new(method: impl Into<String>, url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            status,
            content_type: None,
            content_size: 0,
            timing: Timing::default(),
            request: RequestDetails::default(),
            response: ResponseDetails::default(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        self.content_type = (!content_type.trim().is_empty()).then_some(content_type);
        self
    }

    pub fn with_size(mut self, bytes: u64) -> Self {
        self.content_size = bytes;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Content type with any `;` parameters stripped
    pub fn media_type(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
    }

    /// Content type for display, `N/A` when absent
    pub fn content_type_display(&self) -> &str {
        self.content_type.as_deref().unwrap_or(NO_CONTENT_TYPE)
    }

    /// Status class of the response, e.g. `4xx`
    pub fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }
}

/// Per-request timing phases in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    #[serde(default, deserialize_with = "de::millis")]
    pub connect: f64,
    #[serde(default, deserialize_with = "de::millis")]
    pub wait: f64,
    #[serde(default, deserialize_with = "de::millis")]
    pub receive: f64,
    #[serde(default, deserialize_with = "de::millis")]
    pub total: f64,
}

impl Timing {
    /// Timing whose total is the sum of its phases
    pub fn from_phases(connect: f64, wait: f64, receive: f64) -> Self {
        Self {
            connect,
            wait,
            receive,
            total: connect + wait + receive,
        }
    }
}

/// Request side of a captured entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestDetails {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub headers: BTreeMap<String, String>,
    #[serde(alias = "postData", default, skip_serializing_if = "Option::is_none")]
    pub post_data: Option<String>,
}

impl RequestDetails {
    /// Request body for display, `No post data` when absent
    pub fn post_data_display(&self) -> &str {
        self.post_data.as_deref().unwrap_or(NO_POST_DATA)
    }
}

/// Response side of a captured entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseDetails {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "de::cookies")]
    pub cookies: BTreeMap<String, String>,
}
