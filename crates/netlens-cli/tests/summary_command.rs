use netlens_cli::commands::sites::site_options;
use netlens_cli::commands::summary::summarize;
use std::path::PathBuf;

/// Helper to get path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(filename)
}

#[test]
fn test_summary_counts_failures() {
    let report = summarize(&fixture_path("results.json")).unwrap();

    assert_eq!(report.headline, "2 of 3 URLs analyzed");
    assert_eq!(report.sites.len(), 2);
    assert_eq!(report.sites[0].request_count, 4);
    assert_eq!(report.run.failed[0].url, "https://down.example.org/");
    assert_eq!(report.run.failed[0].message, "Failed to load the webpage");
}

#[test]
fn test_summary_all_failed() {
    let report = summarize(&fixture_path("all-failed.json")).unwrap();

    assert_eq!(report.headline, "0 of 2 URLs analyzed");
    assert!(report.sites.is_empty());
    assert_eq!(report.run.failed[1].message, "net::ERR_NAME_NOT_RESOLVED");
}

#[test]
fn test_site_options() {
    let options = site_options(&fixture_path("results.json")).unwrap();
    assert_eq!(
        options,
        vec!["all", "https://shop.example.com/", "https://blog.example.net/post"]
    );
}

#[test]
fn test_missing_file() {
    assert!(summarize(&fixture_path("does-not-exist.json")).is_err());
}
