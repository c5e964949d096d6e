use crate::model::AnalysisResult;
use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The capture service answers with `{"results": [...]}`; saved runs are
/// often just the bare array.
#[derive(Deserialize)]
struct ResultsEnvelope {
    results: Vec<AnalysisResult>,
}

/// Pick the document shape from its first token, then let serde_json report
/// errors against that shape so line and column survive.
fn parse_document(content: &str) -> Result<Vec<AnalysisResult>> {
    if content.trim_start().starts_with('[') {
        Ok(serde_json::from_str(content)?)
    } else {
        let envelope: ResultsEnvelope = serde_json::from_str(content)?;
        Ok(envelope.results)
    }
}

pub struct ResultsReader;

impl ResultsReader {
    /// Read and parse an analysis results file from the given path
    pub fn from_file(path: &Path) -> Result<Vec<AnalysisResult>> {
        tracing::debug!("Reading analysis results from: {}", path.display());

        let content = fs::read_to_string(path)?;
        let results = parse_document(&content)?;

        tracing::info!("Parsed {} analysis results", results.len());

        Ok(results)
    }

    /// Parse analysis results from a JSON string
    pub fn from_str(content: &str) -> Result<Vec<AnalysisResult>> {
        tracing::debug!("Parsing analysis results from string");

        let results = parse_document(content)?;

        tracing::info!("Parsed {} analysis results from string", results.len());

        Ok(results)
    }

    /// Check that every successful result is usable by the analysis core.
    ///
    /// Failed results only need a URL; their data is never read.
    pub fn validate(results: &[AnalysisResult]) -> Result<()> {
        tracing::debug!("Validating {} analysis results", results.len());

        if results.is_empty() {
            tracing::warn!("Results document contains no URLs");
        }

        for (idx, result) in results.iter().enumerate() {
            if result.url.trim().is_empty() {
                return Err(Error::InvalidStructure(format!(
                    "Result {} has an empty URL",
                    idx
                )));
            }
            if !result.is_success() {
                continue;
            }
            for (entry_idx, entry) in result.entries.iter().enumerate() {
                if entry.method.is_empty() {
                    return Err(Error::InvalidStructure(format!(
                        "Entry {} of {} has empty request method",
                        entry_idx, result.url
                    )));
                }
                if entry.url.is_empty() {
                    return Err(Error::InvalidStructure(format!(
                        "Entry {} of {} has empty request URL",
                        entry_idx, result.url
                    )));
                }
            }
        }

        tracing::debug!("Analysis results are valid");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ENVELOPE: &str = r#"{
        "results": [
            {
                "url": "https://a.com",
                "status": "success",
                "data": [{"url": "https://a.com/", "method": "GET", "status": 200}],
                "page_metrics": {"total_size": 500, "total_load_time": 120, "request_count": 1}
            },
            {"url": "https://b.com", "status": "error", "error": "Failed to load the webpage"}
        ]
    }"#;

    #[test]
    fn test_parse_envelope() {
        let results = ResultsReader::from_str(ENVELOPE).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_success());
        assert_eq!(results[0].entries.len(), 1);
        assert_eq!(results[0].page_metrics.total_size, 500);
        assert!(!results[1].is_success());
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[{"url": "https://a.com", "status": "success", "data": []}]"#;
        let results = ResultsReader::from_str(json).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].entries.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        let json = r#"[{"url": "https://a.com", "status": "pending"}]"#;
        assert!(ResultsReader::from_str(json).is_err());
    }

    #[test]
    fn test_parse_error_keeps_position_in_bare_array() {
        let json = r#"[{"url": "https://a.com", "status": "success",
            "data": [{"url": "https://a.com/", "method": "GET", "status": "200"}]}]"#;
        let err = ResultsReader::from_str(json).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::Parse(_)));
        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("expected u16"), "{message}");
    }

    #[test]
    fn test_parse_error_keeps_position_in_envelope() {
        let json = "{\n  \"results\": [\n    {\"url\": \"https://a.com\", \"status\": \"success\", \"data\": [{\"url\": \"https://a.com/\", \"method\": \"GET\", \"status\": \"200\"}]}\n  ]\n}";
        let message = ResultsReader::from_str(json).unwrap_err().to_string();
        assert!(message.contains("line 3"), "{message}");
        assert!(!message.contains("untagged"), "{message}");
    }

    #[test]
    fn test_parse_envelope_without_results_names_the_field() {
        let message = ResultsReader::from_str(r#"{"data": []}"#)
            .unwrap_err()
            .to_string();
        assert!(message.contains("missing field `results`"), "{message}");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ENVELOPE.as_bytes()).unwrap();

        let results = ResultsReader::from_file(file.path()).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_validate_empty_url() {
        let json = r#"[{"url": "", "status": "error"}]"#;
        let results = ResultsReader::from_str(json).unwrap();
        assert!(matches!(
            ResultsReader::validate(&results),
            Err(Error::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_validate_empty_method() {
        let json = r#"[{"url": "https://a.com", "status": "success",
                        "data": [{"url": "https://a.com/", "method": "", "status": 200}]}]"#;
        let results = ResultsReader::from_str(json).unwrap();
        assert!(ResultsReader::validate(&results).is_err());
    }

    #[test]
    fn test_validate_empty_document_is_ok() {
        assert!(ResultsReader::validate(&[]).is_ok());
    }
}
