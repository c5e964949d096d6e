use crate::analysis::{
    Analyzer, PerformanceAnalyzer, StatusCounts, SummaryStats, Tally, TimingStats,
    group_by_content_type, group_by_method, group_by_status_class, summary_stats,
};
use crate::filter::{self, FilterSpec};
use crate::model::{PageMetrics, RequestEntry};
use crate::store::TelemetryStore;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Selector value that stands for every stored site
pub const ALL_SITES: &str = "all";

/// Which part of the store a view covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSelector {
    /// Every site's filtered requests, concatenated in load order
    All,
    /// One site, by the URL it was analyzed under
    Site(String),
}

impl ViewSelector {
    /// `all` (or nothing) selects every site, anything else is a site URL
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_SITES) {
            ViewSelector::All
        } else {
            ViewSelector::Site(value.to_string())
        }
    }

    /// Values for a site selector: `all` first, then each stored URL
    pub fn options(store: &TelemetryStore) -> Vec<String> {
        std::iter::once(ALL_SITES.to_string())
            .chain(store.urls().into_iter().map(str::to_string))
            .collect()
    }
}

impl fmt::Display for ViewSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewSelector::All => f.write_str(ALL_SITES),
            ViewSelector::Site(url) => f.write_str(url),
        }
    }
}

/// Page metrics of one site covered by a view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageBaseline {
    pub url: String,
    pub page_metrics: PageMetrics,
}

/// Everything a waterfall view displays, derived fresh from the store
#[derive(Debug, Clone, Serialize)]
pub struct SiteView {
    pub selector: String,
    pub entries: Vec<RequestEntry>,
    pub summary: SummaryStats,
    pub status_classes: StatusCounts,
    pub content_types: Tally,
    pub methods: Tally,
    pub timing: TimingStats,
    /// Unfiltered page totals of the covered sites
    pub pages: Vec<PageBaseline>,
}

impl SiteView {
    /// Filter the selected site(s) and aggregate the matching requests
    pub fn build(store: &TelemetryStore, selector: &ViewSelector, spec: &FilterSpec) -> Result<Self> {
        tracing::debug!("Building view for {}", selector);

        let sites = match selector {
            ViewSelector::All => store.all_entries().iter().collect::<Vec<_>>(),
            ViewSelector::Site(url) => {
                vec![store.get(url).ok_or_else(|| Error::SiteNotFound(url.clone()))?]
            }
        };

        let entries: Vec<RequestEntry> = sites
            .iter()
            .flat_map(|site| filter::apply(&site.entries, spec))
            .collect();

        let pages = sites
            .iter()
            .map(|site| PageBaseline {
                url: site.url.clone(),
                page_metrics: site.page_metrics.clone(),
            })
            .collect();

        tracing::info!("View {} shows {} requests", selector, entries.len());

        Ok(Self {
            selector: selector.to_string(),
            summary: summary_stats(&entries),
            status_classes: group_by_status_class(&entries),
            content_types: group_by_content_type(&entries),
            methods: group_by_method(&entries),
            timing: PerformanceAnalyzer::default().analyze(&entries),
            entries,
            pages,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
