use thiserror::Error;

/// Failures raised by schema checks and listener registration.
///
/// None of these cross the creative-facing surface; the mediator turns each
/// one into an error-level log entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MraidError {
    #[error("Required object missing.")]
    RequiredObjectMissing,
    #[error("Invalid property specified - '{0}'.")]
    InvalidProperty(String),
    #[error("Value of property '{key}' is {message}.")]
    InvalidValue { key: String, message: String },
    #[error("received invalid event")]
    InvalidEvent,
    #[error("received invalid listener.")]
    InvalidListener,
}

impl MraidError {
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            Self::RequiredObjectMissing | Self::InvalidProperty(_) | Self::InvalidValue { .. }
        )
    }
}
