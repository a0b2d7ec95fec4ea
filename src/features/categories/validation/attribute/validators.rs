//! Value validators, one per [`AttributeType`].
//!
//! Validators never fail: malformed input (wrong arity, unparsable numbers)
//! simply makes the submission invalid.

use crate::features::categories::models::{AttributeDefinition, AttributeType};

/// Checks submitted values for a single schema entry
pub trait AttributeValueValidator: Send + Sync {
    fn attribute_type(&self) -> AttributeType;

    fn validate(&self, values: &[String], definition: &AttributeDefinition) -> bool;
}

/// Returns the only value, or None when the arity is not exactly one
fn single(values: &[String]) -> Option<&str> {
    match values {
        [value] => Some(value.as_str()),
        _ => None,
    }
}

/// Exactly one value of any content
pub struct StringValidator;

impl AttributeValueValidator for StringValidator {
    fn attribute_type(&self) -> AttributeType {
        AttributeType::String
    }

    fn validate(&self, values: &[String], _definition: &AttributeDefinition) -> bool {
        single(values).is_some()
    }
}

/// Exactly one 32-bit integer
pub struct NumberValidator;

impl AttributeValueValidator for NumberValidator {
    fn attribute_type(&self) -> AttributeType {
        AttributeType::Number
    }

    fn validate(&self, values: &[String], _definition: &AttributeDefinition) -> bool {
        single(values).is_some_and(|v| v.parse::<i32>().is_ok())
    }
}

/// Exactly one literal `true` or `false`
pub struct BooleanValidator;

impl AttributeValueValidator for BooleanValidator {
    fn attribute_type(&self) -> AttributeType {
        AttributeType::Boolean
    }

    fn validate(&self, values: &[String], _definition: &AttributeDefinition) -> bool {
        matches!(single(values), Some("true") | Some("false"))
    }
}

/// Exactly one member of the definition's allowed values
pub struct EnumValidator;

impl AttributeValueValidator for EnumValidator {
    fn attribute_type(&self) -> AttributeType {
        AttributeType::Enum
    }

    fn validate(&self, values: &[String], definition: &AttributeDefinition) -> bool {
        if definition.allowed_values.is_empty() {
            return false;
        }
        single(values).is_some_and(|v| definition.allowed_values.iter().any(|a| a == v))
    }
}

/// Exactly two integers `from`, `to` with `0 <= from < to`
pub struct RangeValidator;

impl AttributeValueValidator for RangeValidator {
    fn attribute_type(&self) -> AttributeType {
        AttributeType::Range
    }

    fn validate(&self, values: &[String], _definition: &AttributeDefinition) -> bool {
        let [from, to] = values else {
            return false;
        };
        match (from.parse::<i32>(), to.parse::<i32>()) {
            (Ok(from), Ok(to)) => from >= 0 && from < to,
            _ => false,
        }
    }
}
