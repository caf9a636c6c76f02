use std::{fs, io, path::Path};

use anyhow::Context;
use mraid_core::EngineConfig;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub engine: EngineConfig,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    scheme: Option<String>,
    default_version: Option<String>,
    forward_logs: Option<bool>,
    log_filter: Option<String>,
}

/// Defaults, then the toml file at `path` if there is one, then the process
/// environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    path: &Path,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()));
        }
    }

    apply_env(&mut settings, var);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.scheme {
        settings.engine.scheme = v;
    }
    if let Some(v) = file_cfg.default_version {
        settings.engine.default_version = v;
    }
    if let Some(v) = file_cfg.forward_logs {
        settings.engine.forward_logs = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

/// `APP__` aliases win over the plain names. Unparseable booleans are
/// ignored.
fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    let lookup = |name: &str, alias: &str| var(alias).or_else(|| var(name));

    if let Some(v) = lookup("MRAID_SCHEME", "APP__SCHEME") {
        settings.engine.scheme = v;
    }
    if let Some(v) = lookup("MRAID_DEFAULT_VERSION", "APP__DEFAULT_VERSION") {
        settings.engine.default_version = v;
    }
    if let Some(v) = lookup("MRAID_FORWARD_LOGS", "APP__FORWARD_LOGS") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.engine.forward_logs = parsed;
        }
    }
    if let Some(v) = lookup("MRAID_LOG_FILTER", "APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
