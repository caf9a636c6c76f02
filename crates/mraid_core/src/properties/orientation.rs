use serde::Serialize;
use serde_json::Value;
use shared::{domain::OrientationType, error::MraidError};

use super::{PropertyBag, PropertyValidator};
use crate::validate::{validate_boolean, validate_includes, ValidateResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationProperties {
    pub allow_orientation_change: bool,
    pub force_orientation: OrientationType,
}

impl OrientationProperties {
    pub fn new(allow_orientation_change: bool, force_orientation: OrientationType) -> Self {
        Self {
            allow_orientation_change,
            force_orientation,
        }
    }

    /// Host-side reset: rotation allowed, nothing forced.
    pub fn reset(&mut self) {
        self.allow_orientation_change = true;
        self.force_orientation = OrientationType::None;
    }
}

impl Default for OrientationProperties {
    fn default() -> Self {
        Self::new(false, OrientationType::None)
    }
}

fn validate_force_orientation(value: &Value) -> ValidateResult {
    validate_includes(OrientationType::names(), value)
}

impl PropertyBag for OrientationProperties {
    fn property_validator(key: &str) -> Option<PropertyValidator> {
        match key {
            "allowOrientationChange" => Some(validate_boolean),
            "forceOrientation" => Some(validate_force_orientation),
            _ => None,
        }
    }

    fn update(&mut self, value: &Value) -> Result<(), MraidError> {
        self.validate(value)?;
        if let Some(flag) = value.get("allowOrientationChange").and_then(Value::as_bool) {
            self.allow_orientation_change = flag;
        }
        if let Some(orientation) = value
            .get("forceOrientation")
            .and_then(OrientationType::from_value)
        {
            self.force_orientation = orientation;
        }
        Ok(())
    }
}
