use super::{csv_field, load_results};
use crate::OutputFormat;
use anyhow::Result;
use netlens_core::analysis::{format_byte_size, format_duration};
use netlens_core::model::PageMetrics;
use netlens_core::store::{RunSummary, TelemetryStore};
use std::path::Path;

#[derive(Debug, Clone, serde::Serialize)]
pub struct SitePages {
    pub url: String,
    pub request_count: usize,
    pub page_metrics: PageMetrics,
}

/// Outcome of one analysis run
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunReport {
    pub file_name: String,
    pub headline: String,
    pub run: RunSummary,
    pub sites: Vec<SitePages>,
}

/// Load a results file and summarize the run
pub fn summarize(file: &Path) -> Result<RunReport> {
    let results = load_results(file)?;
    let run = RunSummary::from_results(&results);

    let mut store = TelemetryStore::new();
    store.load(&results);

    let sites = store
        .all_entries()
        .iter()
        .map(|site| SitePages {
            url: site.url.clone(),
            request_count: site.entries.len(),
            page_metrics: site.page_metrics.clone(),
        })
        .collect();

    Ok(RunReport {
        file_name: file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        headline: run.to_string(),
        run,
        sites,
    })
}

pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    let report = summarize(file)?;

    match format {
        OutputFormat::Json => output_json(&report)?,
        OutputFormat::Table => output_table(&report)?,
        OutputFormat::Pretty => output_pretty(&report)?,
    }

    Ok(())
}

fn output_pretty(report: &RunReport) -> Result<()> {
    use console::style;

    println!(
        "\n{}",
        style(format!("Analysis Run: {}", report.file_name)).bold().cyan()
    );
    println!("  {}", style(&report.headline).yellow());

    println!("\n{}", style("Sites").bold());
    if report.sites.is_empty() {
        println!("  {}", style("No data").dim());
    }
    for site in &report.sites {
        println!(
            "  {}  {} requests, {}, loaded in {}",
            style(&site.url).green(),
            site.request_count,
            format_byte_size(site.page_metrics.total_size),
            format_duration(site.page_metrics.total_load_time)
        );
    }

    if !report.run.failed.is_empty() {
        println!("\n{}", style("Failed").bold());
        for failure in &report.run.failed {
            println!("  {}  {}", style(&failure.url).red(), failure.message);
        }
    }

    if report.run.can_compare() {
        println!("\n{}", style("Commands").dim());
        println!(
            "  {} to compare sites",
            style(format!("netlens compare {}", report.file_name)).cyan()
        );
    }

    println!();
    Ok(())
}

fn output_json(report: &RunReport) -> Result<()> {
    let json_str = serde_json::to_string_pretty(report)?;
    println!("{}", json_str);
    Ok(())
}

fn output_table(report: &RunReport) -> Result<()> {
    println!("Metric,Value");
    println!("File,{}", csv_field(&report.file_name));
    println!("Requested URLs,{}", report.run.requested);
    println!("Analyzed URLs,{}", report.run.succeeded);
    println!("Failed URLs,{}", report.run.failed.len());

    println!();
    println!("URL,Status,Requests,Total Size (bytes),Load Time (ms),Error");
    for site in &report.sites {
        println!(
            "{},success,{},{},{:.2},",
            csv_field(&site.url),
            site.request_count,
            site.page_metrics.total_size,
            site.page_metrics.total_load_time
        );
    }
    for failure in &report.run.failed {
        println!(
            "{},error,,,,{}",
            csv_field(&failure.url),
            csv_field(&failure.message)
        );
    }

    Ok(())
}
