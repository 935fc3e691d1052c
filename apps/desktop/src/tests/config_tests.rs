use super::{apply_env, apply_file, load_settings, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        "api_base_url = \"http://library.local:8080\"\nrequest_timeout_secs = 5\n",
    )
    .expect("parse");

    assert_eq!(settings.api_base_url, "http://library.local:8080");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(5)));
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn app_prefixed_env_wins_over_short_name() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        lookup_from(&[
            ("BOOKERY_API_URL", "http://short:1"),
            ("APP__API_BASE_URL", "http://prefixed:2"),
            ("APP__LOG_FILTER", "debug"),
        ]),
    );

    assert_eq!(settings.api_base_url, "http://prefixed:2");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn unparsable_timeout_is_ignored_and_zero_means_none() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        lookup_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    );
    assert_eq!(settings.request_timeout_secs, None);

    apply_env(&mut settings, lookup_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]));
    assert_eq!(settings.request_timeout_secs, Some(0));
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn malformed_file_is_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "request_timeout_secs = \"later\"").is_err());
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("bookery_missing_{suffix}.toml"));

    let err = load_settings(Some(&path)).expect_err("missing file");
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn explicit_config_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("bookery_config_{suffix}.toml"));
    fs::write(&path, "log_filter = \"warn\"\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.log_filter, "warn");

    fs::remove_file(path).expect("cleanup");
}
