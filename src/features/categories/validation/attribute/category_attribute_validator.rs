use std::sync::Arc;

use uuid::Uuid;

use super::AttributeValidatorRegistry;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{AttributeSchema, AttributeValues};
use crate::features::categories::store::CategoryStore;

/// Checks submitted attribute values against a category's schema.
///
/// Every schema key is examined and all failing keys are reported together.
/// Submitted keys the schema does not declare are ignored.
#[derive(Clone)]
pub struct CategoryAttributeValidator {
    store: Arc<dyn CategoryStore>,
    registry: Arc<AttributeValidatorRegistry>,
}

impl CategoryAttributeValidator {
    pub fn new(store: Arc<dyn CategoryStore>, registry: Arc<AttributeValidatorRegistry>) -> Self {
        Self { store, registry }
    }

    /// Load the category and validate `values` against its schema
    pub async fn validate_category_attributes(
        &self,
        category_id: Uuid,
        values: &AttributeValues,
    ) -> Result<()> {
        let category = self.store.find_by_id_or_not_found(category_id).await?;
        self.validate_against(&category.schema(), values)
    }

    pub fn validate_against(&self, schema: &AttributeSchema, values: &AttributeValues) -> Result<()> {
        let mut invalid_keys = Vec::new();

        for (key, definition) in schema {
            let valid = match values.get(key) {
                None => !definition.required,
                Some(submitted) => self
                    .registry
                    .get_validator(definition.attribute_type)?
                    .validate(submitted, definition),
            };

            if !valid {
                invalid_keys.push(key.clone());
            }
        }

        if invalid_keys.is_empty() {
            Ok(())
        } else {
            tracing::debug!("Attribute validation failed for keys {:?}", invalid_keys);
            Err(AppError::InvalidAttributes(invalid_keys))
        }
    }
}
