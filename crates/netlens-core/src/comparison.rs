use crate::analysis::{Tally, format_byte_size, group_by_content_type, group_by_status_class};
use crate::filter::StatusClass;
use crate::model::AnalysisResult;
use crate::{Error, Result};
use serde::Serialize;
use url::Url;

/// Which content types label the content-type comparison chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSet {
    /// Every type seen on any site, in first-seen order
    #[default]
    Union,
    /// Only the first site's types; later sites' extra types are dropped
    FirstSite,
}

/// One site's values, aligned with the histogram labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub site: String,
    pub values: Vec<usize>,
}

/// Multi-series chart data: one series per site over shared labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub hostname: String,
    pub url: String,
    pub load_time_ms: u64,
    pub request_count: usize,
    pub total_size: String,
    pub total_bytes: u64,
    pub status_2xx: usize,
    pub status_3xx: usize,
    pub status_4xx: usize,
    pub status_5xx: usize,
}

/// Cross-site chart and table data, in the order results were given
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonDataset {
    /// Hostnames, the display label of every series and row
    pub sites: Vec<String>,
    pub load_times: Vec<f64>,
    pub request_counts: Vec<usize>,
    pub content_types: Histogram,
    pub status_classes: Histogram,
    pub table: Vec<ComparisonRow>,
}

impl ComparisonDataset {
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// A comparison needs at least two sites to say anything
    pub fn is_comparable(&self) -> bool {
        self.sites.len() >= 2
    }
}

/// Hostname of an analyzed URL.
///
/// Hostnames label every chart and table row, so a URL without one is an
/// error rather than a placeholder.
pub fn hostname(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| Error::MalformedUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| Error::MalformedUrl {
            url: url.to_string(),
            reason: "URL has no host".to_string(),
        })
}

#[derive(Debug, Default)]
pub struct ComparisonBuilder {
    label_set: LabelSet,
}

impl ComparisonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label_set(mut self, label_set: LabelSet) -> Self {
        self.label_set = label_set;
        self
    }

    /// Build the comparison over the successful results.
    ///
    /// Fewer than two successful sites still yield a (degenerate) dataset.
    /// Fails only if a successful result's URL has no parsable hostname.
    pub fn build(&self, results: &[AnalysisResult]) -> Result<ComparisonDataset> {
        let sites: Vec<&AnalysisResult> = results.iter().filter(|r| r.is_success()).collect();

        tracing::debug!("Building comparison over {} successful sites", sites.len());
        if sites.len() < 2 {
            tracing::debug!("Fewer than two sites, comparison is single-series");
        }

        let hostnames = sites
            .iter()
            .map(|site| hostname(&site.url))
            .collect::<Result<Vec<_>>>()?;

        let type_tallies: Vec<Tally> = sites
            .iter()
            .map(|site| group_by_content_type(&site.entries))
            .collect();
        let type_labels = self.content_type_labels(&type_tallies);

        let mut dataset = ComparisonDataset {
            content_types: Histogram {
                labels: type_labels.clone(),
                series: Vec::with_capacity(sites.len()),
            },
            status_classes: Histogram {
                labels: StatusClass::KNOWN.iter().map(|c| c.to_string()).collect(),
                series: Vec::with_capacity(sites.len()),
            },
            ..Default::default()
        };

        for ((site, host), types) in sites.iter().zip(hostnames).zip(&type_tallies) {
            let statuses = group_by_status_class(&site.entries);
            let [s2, s3, s4, s5] = statuses.known().map(|(_, count)| count);

            dataset.sites.push(host.clone());
            dataset.load_times.push(site.page_metrics.total_load_time);
            dataset.request_counts.push(site.entries.len());

            dataset.content_types.series.push(Series {
                site: host.clone(),
                values: type_labels.iter().map(|label| types.get(label)).collect(),
            });
            dataset.status_classes.series.push(Series {
                site: host.clone(),
                values: vec![s2, s3, s4, s5],
            });

            dataset.table.push(ComparisonRow {
                hostname: host,
                url: site.url.clone(),
                load_time_ms: site.page_metrics.total_load_time.max(0.0).round() as u64,
                request_count: site.entries.len(),
                total_size: format_byte_size(site.page_metrics.total_size),
                total_bytes: site.page_metrics.total_size,
                status_2xx: s2,
                status_3xx: s3,
                status_4xx: s4,
                status_5xx: s5,
            });
        }

        tracing::info!("Comparison built for {} sites", dataset.site_count());

        Ok(dataset)
    }

    fn content_type_labels(&self, tallies: &[Tally]) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        let considered = match self.label_set {
            LabelSet::Union => tallies,
            LabelSet::FirstSite => &tallies[..tallies.len().min(1)],
        };
        for tally in considered {
            for key in tally.keys() {
                if !labels.iter().any(|label| label == key) {
                    labels.push(key.to_string());
                }
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageMetrics, RequestEntry};

    fn site(url: &str, load_time: f64, entries: Vec<RequestEntry>) -> AnalysisResult {
        let metrics = PageMetrics::from_entries(&entries, load_time);
        AnalysisResult::success(url, entries, metrics)
    }

    fn typed(status: u16, content_type: &str) -> RequestEntry {
        RequestEntry::new("GET", "https://example.test/r", status).with_content_type(content_type)
    }

    #[test]
    fn test_load_times_follow_input_order() {
        let results = vec![
            site("https://slow.com", 300.0, vec![typed(200, "text/html")]),
            site("https://fast.com", 100.0, vec![typed(200, "text/html")]),
        ];
        let dataset = ComparisonBuilder::new().build(&results).unwrap();
        assert_eq!(dataset.load_times, vec![300.0, 100.0]);
        assert_eq!(dataset.sites, vec!["slow.com", "fast.com"]);

        let reversed: Vec<AnalysisResult> = results.into_iter().rev().collect();
        let dataset = ComparisonBuilder::new().build(&reversed).unwrap();
        assert_eq!(dataset.load_times, vec![100.0, 300.0]);
    }

    #[test]
    fn test_skips_failed_results() {
        let results = vec![
            site("https://a.com", 100.0, vec![typed(200, "text/html")]),
            AnalysisResult::failure("not even a url", "boom"),
            site("https://b.com", 300.0, vec![typed(200, "text/html"), typed(404, "text/html")]),
        ];
        let dataset = ComparisonBuilder::new().build(&results).unwrap();
        assert_eq!(dataset.sites, vec!["a.com", "b.com"]);
        assert_eq!(dataset.request_counts, vec![1, 2]);
        assert!(dataset.is_comparable());
    }

    #[test]
    fn test_status_histogram_has_four_labels() {
        let results = vec![
            site("https://a.com", 1.0, vec![typed(200, "text/html")]),
            site("https://b.com", 1.0, vec![typed(0, "text/html"), typed(503, "text/html")]),
        ];
        let dataset = ComparisonBuilder::new().build(&results).unwrap();

        assert_eq!(dataset.status_classes.labels, vec!["2xx", "3xx", "4xx", "5xx"]);
        assert_eq!(dataset.status_classes.series[0].values, vec![1, 0, 0, 0]);
        assert_eq!(dataset.status_classes.series[1].values, vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_content_type_union_labels() {
        let results = vec![
            site("https://a.com", 1.0, vec![typed(200, "text/html"), typed(200, "image/png")]),
            site("https://b.com", 1.0, vec![typed(200, "text/html"), typed(200, "font/woff2")]),
        ];
        let dataset = ComparisonBuilder::new().build(&results).unwrap();

        assert_eq!(
            dataset.content_types.labels,
            vec!["text/html", "image/png", "font/woff2"]
        );
        assert_eq!(dataset.content_types.series[0].values, vec![1, 1, 0]);
        assert_eq!(dataset.content_types.series[1].values, vec![1, 0, 1]);
    }

    #[test]
    fn test_content_type_first_site_labels() {
        let results = vec![
            site("https://a.com", 1.0, vec![typed(200, "text/html"), typed(200, "image/png")]),
            site("https://b.com", 1.0, vec![typed(200, "text/html"), typed(200, "font/woff2")]),
        ];
        let dataset = ComparisonBuilder::new()
            .with_label_set(LabelSet::FirstSite)
            .build(&results)
            .unwrap();

        assert_eq!(dataset.content_types.labels, vec!["text/html", "image/png"]);
        assert_eq!(dataset.content_types.series[1].values, vec![1, 0]);
    }

    #[test]
    fn test_table_rows() {
        let entries = vec![
            typed(200, "text/html").with_size(1024),
            typed(200, "text/css").with_size(512),
            typed(301, "text/html"),
            typed(404, "text/html"),
        ];
        let results = vec![site("https://www.a.com/landing?x=1", 1234.6, entries)];
        let dataset = ComparisonBuilder::new().build(&results).unwrap();

        assert!(!dataset.is_comparable());
        let row = &dataset.table[0];
        assert_eq!(row.hostname, "www.a.com");
        assert_eq!(row.load_time_ms, 1235);
        assert_eq!(row.request_count, 4);
        assert_eq!(row.total_size, "1.5 KB");
        assert_eq!(
            (row.status_2xx, row.status_3xx, row.status_4xx, row.status_5xx),
            (2, 1, 1, 0)
        );
    }

    #[test]
    fn test_empty_input() {
        let dataset = ComparisonBuilder::new().build(&[]).unwrap();
        assert_eq!(dataset.site_count(), 0);
        assert!(dataset.table.is_empty());
        assert!(dataset.content_types.labels.is_empty());
        assert_eq!(dataset.status_classes.labels.len(), 4);
    }

    #[test]
    fn test_malformed_url_fails() {
        let results = vec![
            site("https://a.com", 1.0, vec![]),
            site("not a url", 1.0, vec![]),
        ];
        let err = ComparisonBuilder::new().build(&results).unwrap_err();
        assert!(matches!(err, Error::MalformedUrl { ref url, .. } if url == "not a url"));
    }

    #[test]
    fn test_hostname() {
        assert_eq!(hostname("https://example.com:8443/path").unwrap(), "example.com");
        assert!(hostname("mailto:someone@example.com").is_err());
        assert!(hostname("/relative/path").is_err());
    }
}
