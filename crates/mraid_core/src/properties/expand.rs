use serde::Serialize;
use serde_json::Value;
use shared::error::MraidError;

use super::{PropertyBag, PropertyValidator};
use crate::validate::{validate_boolean, validate_number, ValidateResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandProperties {
    /// `-1` means full screen width.
    pub width: f64,
    /// `-1` means full screen height.
    pub height: f64,
    pub use_custom_close: bool,
    is_modal: bool,
}

impl ExpandProperties {
    pub fn new(width: f64, height: f64, use_custom_close: bool, is_modal: bool) -> Self {
        Self {
            width,
            height,
            use_custom_close,
            is_modal,
        }
    }

    pub fn is_modal(&self) -> bool {
        self.is_modal
    }
}

impl Default for ExpandProperties {
    fn default() -> Self {
        Self::new(-1.0, -1.0, false, true)
    }
}

fn accept_any(_: &Value) -> ValidateResult {
    ValidateResult::pass()
}

impl PropertyBag for ExpandProperties {
    fn property_validator(key: &str) -> Option<PropertyValidator> {
        match key {
            "width" | "height" => Some(validate_number),
            "useCustomClose" => Some(validate_boolean),
            // accepted, never written
            "isModal" => Some(accept_any),
            _ => None,
        }
    }

    fn update(&mut self, value: &Value) -> Result<(), MraidError> {
        self.validate(value)?;
        if let Some(width) = value.get("width").and_then(Value::as_f64) {
            self.width = width;
        }
        if let Some(height) = value.get("height").and_then(Value::as_f64) {
            self.height = height;
        }
        if let Some(flag) = value.get("useCustomClose").and_then(Value::as_bool) {
            self.use_custom_close = flag;
        }
        Ok(())
    }
}
