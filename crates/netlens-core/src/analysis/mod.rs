mod format;
mod grouping;
mod performance;
mod summary;

pub use format::{StatusBucket, format_byte_size, format_duration, status_color_class};
pub use grouping::{StatusCounts, Tally, group_by_content_type, group_by_method, group_by_status_class};
pub use performance::PerformanceAnalyzer;
pub use summary::{SummaryAnalyzer, summary_stats};

use crate::model::RequestEntry;
use serde::Serialize;

/// Key used for requests without a content type
pub const UNKNOWN_CONTENT_TYPE: &str = "unknown";

/// Count and byte total of exactly the entries analyzed.
///
/// For a filtered view this differs from the page metrics, which always
/// describe the whole page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimingStats {
    pub total_time: f64,
    pub average_time: f64,
    pub median_time: f64,
    pub connect_time: f64,
    pub wait_time: f64,
    pub receive_time: f64,
    pub slowest_requests: Vec<SlowRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlowRequest {
    pub url: String,
    pub time: f64,
    pub method: String,
    pub status: u16,
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, entries: &[RequestEntry]) -> Self::Output;
}
