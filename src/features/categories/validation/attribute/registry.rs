use std::collections::HashMap;

use super::validators::{
    AttributeValueValidator, BooleanValidator, EnumValidator, NumberValidator, RangeValidator,
    StringValidator,
};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::AttributeType;

/// Immutable lookup from attribute type to its value validator.
///
/// Built once at start-up and shared read-only between requests.
pub struct AttributeValidatorRegistry {
    validators: HashMap<AttributeType, Box<dyn AttributeValueValidator>>,
}

impl AttributeValidatorRegistry {
    /// Registry from an explicit validator list; later entries win on duplicate types.
    pub fn new(validators: Vec<Box<dyn AttributeValueValidator>>) -> Self {
        let validators = validators
            .into_iter()
            .map(|v| (v.attribute_type(), v))
            .collect();
        Self { validators }
    }

    /// Registry covering every [`AttributeType`]
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(StringValidator),
            Box::new(NumberValidator),
            Box::new(BooleanValidator),
            Box::new(EnumValidator),
            Box::new(RangeValidator),
        ])
    }

    pub fn get_validator(&self, attribute_type: AttributeType) -> Result<&dyn AttributeValueValidator> {
        self.validators
            .get(&attribute_type)
            .map(|v| &**v)
            .ok_or_else(|| {
                tracing::error!("No attribute validator registered for {}", attribute_type);
                AppError::CategoryType("Category attribute type not found.".to_string())
            })
    }
}

impl std::fmt::Debug for AttributeValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<String> = self.validators.keys().map(|t| t.to_string()).collect();
        types.sort();
        f.debug_struct("AttributeValidatorRegistry")
            .field("types", &types)
            .finish()
    }
}
