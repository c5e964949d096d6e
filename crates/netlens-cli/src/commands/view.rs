use super::{csv_field, load_results};
use crate::OutputFormat;
use anyhow::Result;
use clap::Args;
use netlens_core::analysis::{StatusBucket, format_byte_size, format_duration, status_color_class};
use netlens_core::filter::{FilterSpec, StatusClass};
use netlens_core::store::TelemetryStore;
use netlens_core::view::{SiteView, ViewSelector};
use std::path::Path;

const NO_STATUS: &str = "N/A";

/// Filter options shared by every view
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only show requests with this HTTP method (exact, case-sensitive)
    #[arg(long)]
    pub method: Option<String>,

    /// Only show this status class (2xx, 3xx, 4xx, 5xx)
    #[arg(long)]
    pub status: Option<String>,

    /// Only show content types containing this text
    #[arg(long)]
    pub content_type: Option<String>,

    /// Only show responses of at least this many KB
    #[arg(long, value_name = "KB", default_value_t = 0.0)]
    pub min_size_kb: f64,

    /// Only show requests to these hosts (exact or glob, comma-separated)
    #[arg(long = "host", value_name = "PATTERN")]
    pub hosts: Vec<String>,
}

impl FilterArgs {
    pub fn to_spec(&self) -> Result<FilterSpec> {
        let host_patterns: Vec<String> = self
            .hosts
            .iter()
            .flat_map(|h| h.split(',').map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty())
            .collect();

        let mut spec = FilterSpec::new().with_min_size_kb(self.min_size_kb);

        if let Some(method) = &self.method {
            spec = spec.with_method(method.as_str());
        }
        if let Some(status) = &self.status {
            spec = spec.with_status_class(status)?;
        }
        if let Some(content_type) = &self.content_type {
            spec = spec.with_content_type(content_type.as_str());
        }
        if !host_patterns.is_empty() {
            spec = spec.with_hosts(host_patterns)?;
        }

        Ok(spec)
    }
}

/// Load a results file and build the view for the selected site(s)
pub fn build_view(file: &Path, site: &str, filters: &FilterArgs) -> Result<SiteView> {
    let results = load_results(file)?;
    let spec = filters.to_spec()?;

    let mut store = TelemetryStore::new();
    store.load(&results);

    let selector = ViewSelector::parse(site);
    Ok(SiteView::build(&store, &selector, &spec)?)
}

pub fn execute(file: &Path, site: &str, filters: &FilterArgs, format: OutputFormat) -> Result<()> {
    tracing::info!("Viewing {} ({})", file.display(), site);

    let view = build_view(file, site, filters)?;

    match format {
        OutputFormat::Json => output_json(&view)?,
        OutputFormat::Table => output_table(&view)?,
        OutputFormat::Pretty => output_pretty(&view)?,
    }

    Ok(())
}

/// Color bucket for a status; `None` for failed requests and classes
/// outside 2xx..5xx
fn status_tone(status: u16) -> Option<StatusBucket> {
    StatusClass::of(status)
        .is_known()
        .then(|| status_color_class(status))
}

fn styled_status(status: u16) -> console::StyledObject<String> {
    use console::style;

    let label = if status == 0 {
        NO_STATUS.to_string()
    } else {
        status.to_string()
    };

    match status_tone(status) {
        Some(StatusBucket::Success) => style(label).green(),
        Some(StatusBucket::Redirect) => style(label).cyan(),
        Some(StatusBucket::ClientError) => style(label).yellow(),
        Some(StatusBucket::ServerError) => style(label).red(),
        None => style(label).dim(),
    }
}

fn output_pretty(view: &SiteView) -> Result<()> {
    use console::style;

    println!("\n{}", style(format!("Network Waterfall: {}", view.selector)).bold().cyan());

    if view.pages.is_empty() {
        println!("\n  {}", style("No data - no URL was analyzed successfully").dim());
        println!();
        return Ok(());
    }

    println!("\n{}", style("Summary").bold());
    println!("  Requests:     {}", style(view.summary.count).yellow());
    println!("  Total Size:   {}", format_byte_size(view.summary.total_bytes));
    if !view.is_empty() {
        println!("  Avg Time:     {}", format_duration(view.timing.average_time));
        println!("  Median Time:  {}", format_duration(view.timing.median_time));
    }

    println!("\n{}", style("Page Metrics").bold());
    for page in &view.pages {
        println!(
            "  {}  {} in {}",
            style(&page.url).green(),
            format_byte_size(page.page_metrics.total_size),
            format_duration(page.page_metrics.total_load_time)
        );
    }

    if view.is_empty() {
        println!("\n  {}", style("No requests match the current filters").dim());
        println!();
        return Ok(());
    }

    println!("\n{}", style("Requests").bold());
    for entry in &view.entries {
        println!(
            "  {} {} {:>10} {:>10}  {}  {}",
            styled_status(entry.status),
            entry.method,
            format_byte_size(entry.content_size),
            format_duration(entry.timing.total),
            style(entry.content_type_display()).dim(),
            entry.url
        );
    }

    println!("\n{}", style("Status Classes").bold());
    for (class, count) in view.status_classes.known() {
        println!("  {}  {}", class, count);
    }
    for (class, count) in view.status_classes.other() {
        println!("  {}  {}", style(class).dim(), count);
    }

    println!("\n{}", style("Content Types").bold());
    for (content_type, count) in view.content_types.sorted_by_count() {
        println!("  {:<32} {}", content_type, count);
    }

    println!("\n{}", style("Methods").bold());
    for (method, count) in view.methods.sorted_by_count() {
        println!("  {:<8} {}", method, count);
    }

    println!();
    Ok(())
}

fn output_json(view: &SiteView) -> Result<()> {
    let json = serde_json::to_string_pretty(view)?;
    println!("{}", json);
    Ok(())
}

fn output_table(view: &SiteView) -> Result<()> {
    println!("URL,Method,Status,Content Type,Size (bytes),Connect (ms),Wait (ms),Receive (ms),Total (ms)");
    for entry in &view.entries {
        println!(
            "{},{},{},{},{},{:.2},{:.2},{:.2},{:.2}",
            csv_field(&entry.url),
            csv_field(&entry.method),
            entry.status,
            csv_field(entry.content_type_display()),
            entry.content_size,
            entry.timing.connect,
            entry.timing.wait,
            entry.timing.receive,
            entry.timing.total
        );
    }
    Ok(())
}
