use super::{Analyzer, SlowRequest, TimingStats};
use crate::model::RequestEntry;

pub struct PerformanceAnalyzer {
    top_n: usize,
}

impl PerformanceAnalyzer {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl Default for PerformanceAnalyzer {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Analyzer for PerformanceAnalyzer {
    type Output = TimingStats;

    fn analyze(&self, entries: &[RequestEntry]) -> Self::Output {
        tracing::debug!("Analyzing timing statistics for {} entries", entries.len());

        if entries.is_empty() {
            return TimingStats::default();
        }

        let total_time: f64 = entries.iter().map(|e| e.timing.total).sum();
        let average_time = total_time / entries.len() as f64;

        let mut times: Vec<f64> = entries.iter().map(|e| e.timing.total).collect();
        times.sort_by(f64::total_cmp);
        let median_time = if times.len().is_multiple_of(2) {
            let mid = times.len() / 2;
            (times[mid - 1] + times[mid]) / 2.0
        } else {
            times[times.len() / 2]
        };

        // Stable sort keeps capture order among equally slow requests
        let mut slow_requests: Vec<_> = entries
            .iter()
            .map(|e| SlowRequest {
                url: e.url.clone(),
                time: e.timing.total,
                method: e.method.clone(),
                status: e.status,
            })
            .collect();
        slow_requests.sort_by(|a, b| b.time.total_cmp(&a.time));
        slow_requests.truncate(self.top_n);

        tracing::debug!(
            "Timing analysis complete: avg={:.2}ms, median={:.2}ms",
            average_time,
            median_time
        );

        TimingStats {
            total_time,
            average_time,
            median_time,
            connect_time: entries.iter().map(|e| e.timing.connect).sum(),
            wait_time: entries.iter().map(|e| e.timing.wait).sum(),
            receive_time: entries.iter().map(|e| e.timing.receive).sum(),
            slowest_requests: slow_requests,
        }
    }
}
