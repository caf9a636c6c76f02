use serde::Deserialize;
use shared::protocol::DEFAULT_SCHEME;

/// Protocol version this engine complies with, reported until the host
/// supplies its own.
pub const DEFAULT_VERSION: &str = "3.0";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scheme of serialized native calls, as in `mraid://close`.
    pub scheme: String,
    pub default_version: String,
    /// Also send every log line to the host as a `log` command.
    pub forward_logs: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.into(),
            default_version: DEFAULT_VERSION.into(),
            forward_logs: true,
        }
    }
}
