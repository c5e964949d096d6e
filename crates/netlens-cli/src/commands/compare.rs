use super::{csv_field, load_results};
use crate::OutputFormat;
use anyhow::Result;
use clap::ValueEnum;
use netlens_core::analysis::format_duration;
use netlens_core::comparison::{ComparisonBuilder, ComparisonDataset, LabelSet};
use std::path::Path;

/// Label set for the content-type comparison chart
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LabelArg {
    /// Types seen on any site
    #[default]
    Union,
    /// Only the first site's types
    FirstSite,
}

impl From<LabelArg> for LabelSet {
    fn from(arg: LabelArg) -> Self {
        match arg {
            LabelArg::Union => LabelSet::Union,
            LabelArg::FirstSite => LabelSet::FirstSite,
        }
    }
}

/// Load a results file and build the cross-site comparison
pub fn build_comparison(file: &Path, labels: LabelArg) -> Result<ComparisonDataset> {
    let results = load_results(file)?;
    let dataset = ComparisonBuilder::new()
        .with_label_set(labels.into())
        .build(&results)?;
    Ok(dataset)
}

pub fn execute(file: &Path, labels: LabelArg, format: OutputFormat) -> Result<()> {
    tracing::info!("Comparing sites in {}", file.display());

    let dataset = build_comparison(file, labels)?;

    match format {
        OutputFormat::Json => output_json(&dataset)?,
        OutputFormat::Table => output_table(&dataset)?,
        OutputFormat::Pretty => output_pretty(&dataset)?,
    }

    Ok(())
}

fn output_pretty(dataset: &ComparisonDataset) -> Result<()> {
    use console::style;

    println!("\n{}", style("Site Comparison").bold().cyan());

    if !dataset.is_comparable() {
        println!(
            "\n  {}",
            style(format!(
                "Comparison needs at least 2 successfully analyzed sites ({} available)",
                dataset.site_count()
            ))
            .dim()
        );
        if dataset.site_count() == 0 {
            println!();
            return Ok(());
        }
    }

    println!("\n{}", style("Overview").bold());
    println!(
        "  {:<32} {:>10} {:>9} {:>11} {:>5} {:>5} {:>5} {:>5}",
        "Site", "Load Time", "Requests", "Size", "2xx", "3xx", "4xx", "5xx"
    );
    for row in &dataset.table {
        println!(
            "  {:<32} {:>10} {:>9} {:>11} {:>5} {:>5} {:>5} {:>5}",
            style(&row.hostname).green(),
            format_duration(row.load_time_ms as f64),
            row.request_count,
            row.total_size,
            row.status_2xx,
            row.status_3xx,
            row.status_4xx,
            row.status_5xx
        );
    }

    if !dataset.content_types.labels.is_empty() {
        println!("\n{}", style("Content Types").bold());
        for (idx, label) in dataset.content_types.labels.iter().enumerate() {
            let counts: Vec<String> = dataset
                .content_types
                .series
                .iter()
                .map(|series| format!("{}={}", series.site, series.values[idx]))
                .collect();
            println!("  {:<32} {}", label, counts.join("  "));
        }
    }

    println!();
    Ok(())
}

fn output_json(dataset: &ComparisonDataset) -> Result<()> {
    let json = serde_json::to_string_pretty(dataset)?;
    println!("{}", json);
    Ok(())
}

fn output_table(dataset: &ComparisonDataset) -> Result<()> {
    println!("Hostname,URL,Load Time (ms),Requests,Total Size,2xx,3xx,4xx,5xx");
    for row in &dataset.table {
        println!(
            "{},{},{},{},{},{},{},{},{}",
            csv_field(&row.hostname),
            csv_field(&row.url),
            row.load_time_ms,
            row.request_count,
            csv_field(&row.total_size),
            row.status_2xx,
            row.status_3xx,
            row.status_4xx,
            row.status_5xx
        );
    }
    Ok(())
}
