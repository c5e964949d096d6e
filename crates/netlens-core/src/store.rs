use crate::model::{AnalysisResult, PageMetrics, RequestEntry};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Captured requests and page metrics of one successfully analyzed site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteTelemetry {
    pub url: String,
    pub entries: Vec<RequestEntry>,
    pub page_metrics: PageMetrics,
}

/// Session state for the most recent analysis run.
///
/// Holds every successful result keyed by its URL, in load order. A load
/// always replaces the whole state.
#[derive(Debug, Default)]
pub struct TelemetryStore {
    sites: Vec<SiteTelemetry>,
    index: HashMap<String, usize>,
}

impl TelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store's contents with the successful results of a run.
    ///
    /// Failed results are skipped. A run with no successful result leaves
    /// the store empty. If a URL appears twice, the later result's data
    /// wins while the earlier position is kept.
    pub fn load(&mut self, results: &[AnalysisResult]) {
        self.clear();

        for result in results.iter().filter(|r| r.is_success()) {
            let site = SiteTelemetry {
                url: result.url.clone(),
                entries: result.entries.clone(),
                page_metrics: result.page_metrics.clone(),
            };

            match self.index.get(&result.url) {
                Some(&idx) => {
                    tracing::warn!("Duplicate result for {}, keeping the later one", result.url);
                    self.sites[idx] = site;
                }
                None => {
                    self.index.insert(result.url.clone(), self.sites.len());
                    self.sites.push(site);
                }
            }
        }

        if self.sites.is_empty() {
            tracing::warn!("No successful results among {} analyzed URLs", results.len());
        } else {
            tracing::info!(
                "Loaded {} of {} analyzed URLs ({} requests)",
                self.sites.len(),
                results.len(),
                self.sites.iter().map(|s| s.entries.len()).sum::<usize>()
            );
        }
    }

    /// Drop all state
    pub fn clear(&mut self) {
        self.sites.clear();
        self.index.clear();
    }

    pub fn get(&self, url: &str) -> Option<&SiteTelemetry> {
        self.index.get(url).map(|&idx| &self.sites[idx])
    }

    /// Every stored site in load order
    pub fn all_entries(&self) -> &[SiteTelemetry] {
        &self.sites
    }

    /// Stored URLs in load order
    pub fn urls(&self) -> Vec<&str> {
        self.sites.iter().map(|s| s.url.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// A URL whose analysis failed upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedUrl {
    pub url: String,
    pub message: String,
}

/// How many of the requested URLs were analyzed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: Vec<FailedUrl>,
}

impl RunSummary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let failed: Vec<FailedUrl> = results
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| FailedUrl {
                url: r.url.clone(),
                message: r
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "Unknown error".to_string()),
            })
            .collect();

        Self {
            requested: results.len(),
            succeeded: results.len() - failed.len(),
            failed,
        }
    }

    /// True when enough sites succeeded for a comparison
    pub fn can_compare(&self) -> bool {
        self.succeeded >= 2
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} URLs analyzed", self.succeeded, self.requested)
    }
}
