use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of value an attribute accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttributeType {
    String,
    Number,
    Boolean,
    Enum,
    Range,
}

impl AttributeType {
    pub const ALL: [AttributeType; 5] = [
        AttributeType::String,
        AttributeType::Number,
        AttributeType::Boolean,
        AttributeType::Enum,
        AttributeType::Range,
    ];
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::String => write!(f, "STRING"),
            AttributeType::Number => write!(f, "NUMBER"),
            AttributeType::Boolean => write!(f, "BOOLEAN"),
            AttributeType::Enum => write!(f, "ENUM"),
            AttributeType::Range => write!(f, "RANGE"),
        }
    }
}

/// One entry of a category's attribute schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(default)]
    pub required: bool,
    /// Only meaningful for `ENUM`
    #[serde(default)]
    pub allowed_values: Vec<String>,
}

impl AttributeDefinition {
    pub fn new(attribute_type: AttributeType, required: bool) -> Self {
        Self {
            attribute_type,
            required,
            allowed_values: Vec::new(),
        }
    }

    pub fn enumeration<I, S>(required: bool, allowed_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attribute_type: AttributeType::Enum,
            required,
            allowed_values: allowed_values.into_iter().map(Into::into).collect(),
        }
    }

    /// Describes why this definition is malformed, if it is.
    pub fn shape_error(&self, key: &str) -> Option<String> {
        match self.attribute_type {
            AttributeType::Enum if self.allowed_values.is_empty() => Some(format!(
                "Attribute '{}' of type ENUM must declare allowed values.",
                key
            )),
            _ => None,
        }
    }
}

/// Attribute key -> definition, declared on CHILD categories
pub type AttributeSchema = BTreeMap<String, AttributeDefinition>;

/// Attribute key -> submitted values, carried by products
pub type AttributeValues = BTreeMap<String, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_json_shape() {
        let definition: AttributeDefinition = serde_json::from_value(serde_json::json!({
            "type": "ENUM",
            "required": true,
            "allowedValues": ["8GB", "16GB"]
        }))
        .unwrap();

        assert_eq!(
            definition,
            AttributeDefinition::enumeration(true, ["8GB", "16GB"])
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let definition: AttributeDefinition =
            serde_json::from_value(serde_json::json!({ "type": "NUMBER" })).unwrap();

        assert!(!definition.required);
        assert!(definition.allowed_values.is_empty());
    }

    #[test]
    fn test_enum_without_values_has_shape_error() {
        let definition = AttributeDefinition::new(AttributeType::Enum, false);
        assert_eq!(
            definition.shape_error("color").as_deref(),
            Some("Attribute 'color' of type ENUM must declare allowed values.")
        );

        let string = AttributeDefinition::new(AttributeType::String, false);
        assert_eq!(string.shape_error("brand"), None);
    }
}
