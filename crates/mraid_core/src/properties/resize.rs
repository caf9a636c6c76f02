use serde::Serialize;
use serde_json::Value;
use shared::{domain::ClosePosition, error::MraidError};

use super::{PropertyBag, PropertyValidator};
use crate::validate::{
    validate_boolean, validate_greater_than_or_equal, validate_includes, validate_number,
    ValidateResult,
};

pub const MIN_RESIZE_DIMENSION: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeProperties {
    pub width: f64,
    pub height: f64,
    /// Positive moves right.
    pub offset_x: f64,
    /// Positive moves down.
    pub offset_y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_close_position: Option<ClosePosition>,
    pub allow_offscreen: bool,
}

impl ResizeProperties {
    pub fn new(
        width: f64,
        height: f64,
        offset_x: f64,
        offset_y: f64,
        custom_close_position: Option<ClosePosition>,
        allow_offscreen: bool,
    ) -> Self {
        Self {
            width,
            height,
            offset_x,
            offset_y,
            custom_close_position,
            allow_offscreen,
        }
    }
}

/// Zero size on purpose: a resize issued before the creative configured one
/// fails the minimum-size check.
impl Default for ResizeProperties {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, Some(ClosePosition::TopRight), true)
    }
}

fn validate_dimension(value: &Value) -> ValidateResult {
    validate_greater_than_or_equal(value, MIN_RESIZE_DIMENSION)
}

fn validate_close_position(value: &Value) -> ValidateResult {
    validate_includes(ClosePosition::names(), value)
}

impl PropertyBag for ResizeProperties {
    fn property_validator(key: &str) -> Option<PropertyValidator> {
        match key {
            "width" | "height" => Some(validate_dimension),
            "offsetX" | "offsetY" => Some(validate_number),
            // an absent key never reaches here, so only present values are checked
            "customClosePosition" => Some(validate_close_position),
            "allowOffscreen" => Some(validate_boolean),
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
        if let Some(offset_x) = value.get("offsetX").and_then(Value::as_f64) {
            self.offset_x = offset_x;
        }
        if let Some(offset_y) = value.get("offsetY").and_then(Value::as_f64) {
            self.offset_y = offset_y;
        }
        if let Some(position) = value
            .get("customClosePosition")
            .and_then(ClosePosition::from_value)
        {
            self.custom_close_position = Some(position);
        }
        if let Some(flag) = value.get("allowOffscreen").and_then(Value::as_bool) {
            self.allow_offscreen = flag;
        }
        Ok(())
    }
}
