//! Tests for loading `ClientConfig` from environment-style lookups.

use std::collections::HashMap;
use std::time::Duration;

use assert_matches::assert_matches;

use groupings_client::{ClientConfig, ConfigError};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

const REQUIRED: [(&str, &str); 2] = [
    ("GROUPINGS_API_BASE_URL", "https://groupings.example.edu/api/v2.1/"),
    ("GROUPINGS_CURRENT_USER", "testiwta"),
];

#[test]
fn defaults_match_observed_behaviour() {
    let config = ClientConfig::from_lookup(lookup(&REQUIRED)).unwrap();

    assert_eq!(config.base_url, "https://groupings.example.edu/api/v2.1");
    assert_eq!(config.current_user, "testiwta");
    assert_eq!(config.poll.interval, Duration::from_secs(5));
    assert_eq!(config.poll.max_attempts, None);
    assert_eq!(config.poll.timeout, None);
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.opt_in_attribute, "opt-in");
    assert_eq!(config.opt_out_attribute, "opt-out");
}

#[test]
fn overrides_are_applied() {
    let mut vars = REQUIRED.to_vec();
    vars.extend([
        ("GROUPINGS_POLL_INTERVAL_MS", "250"),
        ("GROUPINGS_POLL_MAX_ATTEMPTS", "12"),
        ("GROUPINGS_POLL_TIMEOUT_SECS", "600"),
        ("GROUPINGS_REQUEST_TIMEOUT_SECS", "5"),
        ("GROUPINGS_OPT_IN", "optIn"),
        ("GROUPINGS_OPT_OUT", "optOut"),
    ]);

    let config = ClientConfig::from_lookup(lookup(&vars)).unwrap();

    assert_eq!(config.poll.interval, Duration::from_millis(250));
    assert_eq!(config.poll.max_attempts, Some(12));
    assert_eq!(config.poll.timeout, Some(Duration::from_secs(600)));
    assert_eq!(config.request_timeout, Duration::from_secs(5));
    assert_eq!(config.opt_in_attribute, "optIn");
    assert_eq!(config.opt_out_attribute, "optOut");
}

#[test]
fn missing_base_url_is_reported() {
    let result = ClientConfig::from_lookup(lookup(&[("GROUPINGS_CURRENT_USER", "u")]));

    assert_matches!(result, Err(ConfigError::Missing("GROUPINGS_API_BASE_URL")));
}

#[test]
fn blank_user_counts_as_missing() {
    let result = ClientConfig::from_lookup(lookup(&[
        ("GROUPINGS_API_BASE_URL", "http://localhost"),
        ("GROUPINGS_CURRENT_USER", "  "),
    ]));

    assert_matches!(result, Err(ConfigError::Missing("GROUPINGS_CURRENT_USER")));
}

#[test]
fn invalid_number_is_reported() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("GROUPINGS_POLL_INTERVAL_MS", "soon"));

    let result = ClientConfig::from_lookup(lookup(&vars));

    assert_matches!(
        result,
        Err(ConfigError::Invalid { var: "GROUPINGS_POLL_INTERVAL_MS", ref value }) if value == "soon"
    );
}

#[test]
fn zero_request_timeout_is_rejected() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("GROUPINGS_REQUEST_TIMEOUT_SECS", "0"));

    let result = ClientConfig::from_lookup(lookup(&vars));

    assert_matches!(
        result,
        Err(ConfigError::Invalid { var: "GROUPINGS_REQUEST_TIMEOUT_SECS", ref value }) if value == "0"
    );
}

#[test]
fn blank_opt_attribute_is_rejected() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("GROUPINGS_OPT_OUT", " "));

    let result = ClientConfig::from_lookup(lookup(&vars));

    assert_matches!(
        result,
        Err(ConfigError::Invalid { var: "GROUPINGS_OPT_OUT", .. })
    );
}
