//! Runtime checks for values that arrive from the creative untyped.

use serde_json::Value;

pub const NOT_A_NUMBER: &str = "not a number";
pub const NOT_A_BOOLEAN: &str = "not a boolean type";
pub const NOT_A_VALID_OPTION: &str = "not a valid option";
pub const TOO_SMALL: &str = "too small";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateResult {
    pub passed: bool,
    pub message: Option<&'static str>,
}

impl ValidateResult {
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: None,
        }
    }

    pub fn fail(message: &'static str) -> Self {
        Self {
            passed: false,
            message: Some(message),
        }
    }
}

pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

pub fn is_number(value: &Value) -> bool {
    value.as_f64().is_some_and(|n| !n.is_nan())
}

pub fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

pub fn is_greater_than_or_equal_to(value: &Value, lower_bound_inclusive: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|n| !n.is_nan() && n >= lower_bound_inclusive)
}

/// True when `value` is a string equal to one of `options`.
pub fn is_includes<'a>(options: impl IntoIterator<Item = &'a str>, value: &Value) -> bool {
    match value.as_str() {
        Some(candidate) => options.into_iter().any(|option| option == candidate),
        None => false,
    }
}

pub fn validate_number(value: &Value) -> ValidateResult {
    if is_number(value) {
        ValidateResult::pass()
    } else {
        ValidateResult::fail(NOT_A_NUMBER)
    }
}

/// Type is checked before the bound so each failure keeps its own message.
pub fn validate_greater_than_or_equal(value: &Value, lower_bound_inclusive: f64) -> ValidateResult {
    if !is_number(value) {
        return ValidateResult::fail(NOT_A_NUMBER);
    }
    if !is_greater_than_or_equal_to(value, lower_bound_inclusive) {
        return ValidateResult::fail(TOO_SMALL);
    }
    ValidateResult::pass()
}

pub fn validate_boolean(value: &Value) -> ValidateResult {
    if is_boolean(value) {
        ValidateResult::pass()
    } else {
        ValidateResult::fail(NOT_A_BOOLEAN)
    }
}

pub fn validate_includes<'a>(
    options: impl IntoIterator<Item = &'a str>,
    value: &Value,
) -> ValidateResult {
    if is_includes(options, value) {
        ValidateResult::pass()
    } else {
        ValidateResult::fail(NOT_A_VALID_OPTION)
    }
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
