use super::{apply_env, apply_file, load_settings, load_settings_with, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_match_engine_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.engine.scheme, "mraid");
    assert_eq!(settings.engine.default_version, "3.0");
    assert!(settings.engine.forward_logs);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
scheme = "adhost"
forward_logs = false
"#,
    )
    .expect("parse");

    assert_eq!(settings.engine.scheme, "adhost");
    assert!(!settings.engine.forward_logs);
    assert_eq!(settings.engine.default_version, "3.0");
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "forward_logs = \"sometimes\"").is_err());
}

#[test]
fn app_alias_wins_over_plain_name() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_of(&[
            ("MRAID_SCHEME", "plain"),
            ("APP__SCHEME", "alias"),
            ("MRAID_DEFAULT_VERSION", "2.0"),
            ("MRAID_LOG_FILTER", "mraid_core=debug"),
        ]),
    );

    assert_eq!(settings.engine.scheme, "alias");
    assert_eq!(settings.engine.default_version, "2.0");
    assert_eq!(settings.log_filter, "mraid_core=debug");
}

#[test]
fn unparseable_forward_logs_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_of(&[("MRAID_FORWARD_LOGS", "nope")]));
    assert!(settings.engine.forward_logs);

    apply_env(&mut settings, env_of(&[("APP__FORWARD_LOGS", "false")]));
    assert!(!settings.engine.forward_logs);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("mraid_harness_missing_{suffix}.toml"));

    assert!(load_settings(&path).is_ok());
}

#[test]
fn config_file_is_read_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("mraid_harness_{suffix}.toml"));
    fs::write(&path, "default_version = \"2.0\"\n").expect("write");

    let from_file = load_settings_with(&path, env_of(&[]));
    let env_over_file = load_settings_with(&path, env_of(&[("MRAID_DEFAULT_VERSION", "2.1")]));
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(from_file.expect("load").engine.default_version, "2.0");
    assert_eq!(env_over_file.expect("load").engine.default_version, "2.1");
}
