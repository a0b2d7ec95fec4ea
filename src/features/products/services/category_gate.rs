use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{AttributeValues, Category, CategoryType};
use crate::features::categories::store::CategoryStore;
use crate::features::categories::validation::CategoryAttributeValidator;

/// Decides whether products may be attached to a category.
///
/// Only CHILD categories hold products, and product attributes are checked
/// against that category's schema.
#[derive(Clone)]
pub struct ProductCategoryGate {
    store: Arc<dyn CategoryStore>,
    attribute_validator: CategoryAttributeValidator,
}

impl ProductCategoryGate {
    pub fn new(store: Arc<dyn CategoryStore>, attribute_validator: CategoryAttributeValidator) -> Self {
        Self {
            store,
            attribute_validator,
        }
    }

    /// Load the category and require that it resolves to CHILD
    pub async fn check_eligible(&self, category_id: Uuid) -> Result<Category> {
        let category = self
            .store
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product category not found.".to_string()))?;

        let category_type = category.resolved_type()?;
        if category_type != CategoryType::Child {
            tracing::warn!(
                "Rejected product category {} of type {}",
                category_id,
                category_type
            );
            return Err(AppError::CategoryType(format!(
                "Incorrect category type. Expected {} but was {}.",
                CategoryType::Child,
                category_type
            )));
        }

        Ok(category)
    }

    /// Eligibility plus attribute validation against the category's schema
    pub async fn check_product(&self, category_id: Uuid, values: &AttributeValues) -> Result<Category> {
        let category = self.check_eligible(category_id).await?;
        self.attribute_validator
            .validate_against(&category.schema(), values)?;
        Ok(category)
    }
}
