use netlens_cli::commands::view::{FilterArgs, build_view};
use netlens_core::filter::StatusClass;
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

/// Test that the "all" view concatenates every successful site in load order
#[test]
fn test_view_all_sites() {
    let view = build_view(&fixture_path("results.json"), "all", &FilterArgs::default()).unwrap();

    assert_eq!(view.summary.count, 7);
    assert_eq!(view.summary.total_bytes, 16128);
    assert_eq!(view.pages.len(), 2);
    assert_eq!(view.entries[0].url, "https://shop.example.com/");
    assert_eq!(view.entries[4].url, "https://blog.example.net/post");

    assert_eq!(view.status_classes.get(StatusClass::SUCCESS), 4);
    assert_eq!(view.status_classes.get(StatusClass::REDIRECT), 1);
    assert_eq!(view.status_classes.get(StatusClass::CLIENT_ERROR), 1);
    assert_eq!(view.status_classes.get(StatusClass::SERVER_ERROR), 1);

    assert_eq!(view.content_types.get("text/html"), 3);
    assert_eq!(view.content_types.get("unknown"), 1);
}

/// Test filtering one site by status class
#[test]
fn test_view_single_site_status_filter() {
    let filters = FilterArgs {
        status: Some("4xx".to_string()),
        ..Default::default()
    };
    let view = build_view(&fixture_path("results.json"), "https://shop.example.com/", &filters).unwrap();

    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.entries[0].url, "https://cdn.example.com/missing.png");
    // Page metrics stay the whole-page baseline
    assert_eq!(view.pages[0].page_metrics.total_size, 6656);
    assert_eq!(view.summary.total_bytes, 512);
}

/// Test content type, size and host filters across all sites
#[test]
fn test_view_filters() {
    let file = fixture_path("results.json");

    let html = FilterArgs {
        content_type: Some("html".to_string()),
        ..Default::default()
    };
    assert_eq!(build_view(&file, "all", &html).unwrap().entries.len(), 3);

    let large = FilterArgs {
        min_size_kb: 2.0,
        ..Default::default()
    };
    assert_eq!(build_view(&file, "all", &large).unwrap().entries.len(), 3);

    let cdn = FilterArgs {
        hosts: vec!["cdn.example.com".to_string()],
        ..Default::default()
    };
    assert_eq!(build_view(&file, "all", &cdn).unwrap().entries.len(), 2);

    let post = FilterArgs {
        method: Some("POST".to_string()),
        hosts: vec!["*.example.com, *.example.net".to_string()],
        ..Default::default()
    };
    let view = build_view(&file, "all", &post).unwrap();
    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.entries[0].content_type_display(), "N/A");
    assert_eq!(view.entries[0].request.post_data_display(), "{\"event\":\"view\"}");
}

/// Test that an unknown site is reported
#[test]
fn test_view_unknown_site() {
    let result = build_view(
        &fixture_path("results.json"),
        "https://down.example.org/",
        &FilterArgs::default(),
    );
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Site not found"));
}

/// Test that an invalid status class is rejected
#[test]
fn test_view_invalid_status() {
    let filters = FilterArgs {
        status: Some("9xx".to_string()),
        ..Default::default()
    };
    assert!(build_view(&fixture_path("results.json"), "all", &filters).is_err());
}

/// Test that a run without successes renders as empty rather than failing
#[test]
fn test_view_all_failed() {
    let view = build_view(&fixture_path("all-failed.json"), "all", &FilterArgs::default()).unwrap();
    assert!(view.is_empty());
    assert!(view.pages.is_empty());
}
