//! Validated, partially updatable property records the creative configures
//! before asking the host to expand, resize or lock orientation.

mod expand;
mod orientation;
mod resize;

pub use expand::ExpandProperties;
pub use orientation::OrientationProperties;
pub use resize::{ResizeProperties, MIN_RESIZE_DIMENSION};

use serde::Serialize;
use serde_json::Value;
use shared::error::MraidError;

use crate::validate::ValidateResult;

pub type PropertyValidator = fn(&Value) -> ValidateResult;

pub trait PropertyBag: Clone + Serialize {
    /// Validator for a recognized key, `None` for anything else.
    fn property_validator(key: &str) -> Option<PropertyValidator>;

    /// Checks every key present in `value`, in the order given. Keys that are
    /// not present are not required.
    fn validate(&self, value: &Value) -> Result<(), MraidError> {
        let Some(object) = value.as_object() else {
            return Err(MraidError::RequiredObjectMissing);
        };

        for (key, field) in object {
            let validator = Self::property_validator(key)
                .ok_or_else(|| MraidError::InvalidProperty(key.clone()))?;
            let result = validator(field);
            if !result.passed {
                return Err(MraidError::invalid_value(
                    key.as_str(),
                    result.message.unwrap_or_default(),
                ));
            }
        }
        Ok(())
    }

    /// Validates first; on failure nothing is written. Afterwards copies only
    /// the well-typed keys present in `value`.
    fn update(&mut self, value: &Value) -> Result<(), MraidError>;

    /// The record as the creative would see it, used to re-check live state.
    fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
#[path = "../tests/properties_tests.rs"]
mod tests;
