use super::load_results;
use crate::OutputFormat;
use anyhow::Result;
use netlens_core::store::TelemetryStore;
use netlens_core::view::ViewSelector;
use std::path::Path;

/// Values accepted by `view --site`: `all` followed by every analyzed URL
pub fn site_options(file: &Path) -> Result<Vec<String>> {
    let results = load_results(file)?;
    let mut store = TelemetryStore::new();
    store.load(&results);
    Ok(ViewSelector::options(&store))
}

pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    let options = site_options(file)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        _ => {
            for option in &options {
                println!("{}", option);
            }
        }
    }

    Ok(())
}
