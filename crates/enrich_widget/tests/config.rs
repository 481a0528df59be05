use std::fs;

use enrich_logging::LogDestination;
use enrich_widget::config::{load, DEFAULT_RECORD_LINK_TEMPLATE};
use enrich_widget::{ConfigError, RecordLinks, TemplateRecordLinks, WidgetConfig};
use log::LevelFilter;
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let config = load(&temp.path().join("enrich.ron")).unwrap();

    assert_eq!(config, WidgetConfig::default());
    assert_eq!(config.channel_settings().name, "google-search");
    assert_eq!(config.record_link_template, DEFAULT_RECORD_LINK_TEMPLATE);
}

#[test]
fn partial_file_overrides_only_given_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("enrich.ron");
    fs::write(
        &path,
        r#"(
            channel_name: "results-channel",
            log_destination: Both,
            log_level: "debug",
        )"#,
    )
    .unwrap();

    let config = load(&path).unwrap();
    assert_eq!(config.channel_name, "results-channel");
    assert_eq!(config.log_destination, LogDestination::Both);
    assert_eq!(config.level_filter(), LevelFilter::Debug);
    assert_eq!(config.record_link_template, DEFAULT_RECORD_LINK_TEMPLATE);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("enrich.ron");
    fs::write(&path, "(channel_name: 42").unwrap();

    assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
}

#[test]
fn unknown_log_level_falls_back_to_info() {
    let config = WidgetConfig {
        log_level: "chatty".into(),
        ..WidgetConfig::default()
    };
    assert_eq!(config.level_filter(), LevelFilter::Info);
}

#[test]
fn record_links_fill_template_or_append_id() {
    let templated = TemplateRecordLinks::new("https://records.example/persons/{id}/overview");
    assert_eq!(
        templated.full_record_link("42"),
        "https://records.example/persons/42/overview"
    );

    let base = TemplateRecordLinks::new("https://records.example/persons/");
    assert_eq!(base.full_record_link("42"), "https://records.example/persons/42");
}
