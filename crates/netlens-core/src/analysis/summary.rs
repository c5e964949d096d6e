use super::{Analyzer, SummaryStats};
use crate::model::RequestEntry;

pub struct SummaryAnalyzer;

impl Analyzer for SummaryAnalyzer {
    type Output = SummaryStats;

    fn analyze(&self, entries: &[RequestEntry]) -> Self::Output {
        let stats = SummaryStats {
            count: entries.len(),
            total_bytes: entries.iter().map(|e| e.content_size).sum(),
        };

        tracing::debug!(
            "Summary: {} entries, {} bytes",
            stats.count,
            stats.total_bytes
        );

        stats
    }
}

/// Summary numbers for the given (usually filtered) entries
pub fn summary_stats(entries: &[RequestEntry]) -> SummaryStats {
    SummaryAnalyzer.analyze(entries)
}
