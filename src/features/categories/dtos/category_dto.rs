use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{
    AttributeDefinition, AttributeSchema, AttributeValues, Category, CategoryType,
};

/// Request DTO for creating a category.
///
/// The category type is derived from `parentId` and `attributes`; a declared
/// `categoryType` is only cross-checked against it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters."),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    pub title: String,

    #[validate(
        length(min = 1, max = 100, message = "Code must be between 1 and 100 characters."),
        regex(
            path = "*crate::shared::validation::CODE_REGEX",
            message = "Code must be lowercase alphanumeric words separated by single hyphens."
        )
    )]
    pub code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_type: Option<CategoryType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, AttributeDefinition>>,
}

impl CreateCategoryDto {
    pub fn into_category(self, category_type: CategoryType) -> Category {
        Category::new(
            self.title.trim().to_string(),
            self.code,
            self.parent_id,
            category_type,
            self.attributes,
        )
    }

    /// Declared schema; empty unless `attributes` was sent
    pub fn schema(&self) -> AttributeSchema {
        self.attributes.clone().unwrap_or_default()
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub title: String,
    pub code: String,
    pub parent_id: Option<Uuid>,
    pub category_type: CategoryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, AttributeDefinition>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            title: c.title,
            code: c.code,
            parent_id: c.parent_id,
            category_type: c.category_type,
            attributes: c.attributes,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub title: String,
    pub code: String,
    pub category_type: CategoryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, AttributeDefinition>>,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from flat list of categories
    pub fn build_tree(categories: Vec<Category>) -> Vec<CategoryTreeDto> {
        categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .map(|root| Self::build_node(root, &categories))
            .collect()
    }

    fn build_node(category: &Category, all_categories: &[Category]) -> CategoryTreeDto {
        let children: Vec<CategoryTreeDto> = all_categories
            .iter()
            .filter(|c| c.parent_id == Some(category.id))
            .map(|child| Self::build_node(child, all_categories))
            .collect();

        CategoryTreeDto {
            id: category.id,
            title: category.title.clone(),
            code: category.code.clone(),
            category_type: category.category_type,
            attributes: category.attributes.clone(),
            children,
        }
    }
}

/// Query params for listing categories
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// Only return categories of this type
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,

    /// If true, return tree structure. Default: false (flat list)
    #[serde(default)]
    pub tree: bool,
}

/// Attribute values to check against a category's schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidateAttributesDto {
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl ValidateAttributesDto {
    pub fn into_values(self) -> AttributeValues {
        self.attributes
    }
}
