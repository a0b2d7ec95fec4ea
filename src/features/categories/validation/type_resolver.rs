use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{AttributeSchema, CategoryType};

/// Classify a category from its structural signals.
///
/// | parent | attributes      | type  |
/// |--------|-----------------|-------|
/// | none   | none            | PARENT|
/// | some   | none            | SUB   |
/// | some   | some, non-empty | CHILD |
///
/// Anything else is an invalid structure. Pure: no store lookups.
pub fn resolve_category_type(
    parent_id: Option<Uuid>,
    attributes: Option<&AttributeSchema>,
) -> Result<CategoryType> {
    match (parent_id, attributes) {
        (None, None) => Ok(CategoryType::Parent),
        (Some(_), None) => Ok(CategoryType::Sub),
        (Some(_), Some(schema)) if !schema.is_empty() => Ok(CategoryType::Child),
        _ => Err(AppError::Validation(
            "Invalid category structure.".to_string(),
        )),
    }
}
