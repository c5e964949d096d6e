pub mod compare;
pub mod completion;
pub mod sites;
pub mod summary;
pub mod view;

use anyhow::{Context, Result};
use netlens_core::ingest::ResultsReader;
use netlens_core::model::AnalysisResult;
use std::path::Path;

/// Read and validate an analysis results file
pub fn load_results(file: &Path) -> Result<Vec<AnalysisResult>> {
    let results = ResultsReader::from_file(file)
        .with_context(|| format!("Failed to load analysis results from {}", file.display()))?;
    ResultsReader::validate(&results)?;
    Ok(results)
}

/// Quote a CSV field when it contains a separator, quote or line break
pub(crate) fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_plain_value_is_unquoted() {
        assert_eq!(csv_field("https://a.com/app.js"), "https://a.com/app.js");
        assert_eq!(csv_field(""), "");
    }

    #[test]
    fn test_csv_field_quotes_separators_and_line_breaks() {
        assert_eq!(csv_field("text/html, charset"), "\"text/html, charset\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(csv_field("carriage\rreturn"), "\"carriage\rreturn\"");
    }

    #[test]
    fn test_csv_field_doubles_embedded_quotes() {
        assert_eq!(csv_field(r#"say "hi""#), r#""say ""hi""""#);
    }
}
