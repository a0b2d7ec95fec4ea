use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryTreeDto, CreateCategoryDto};
use crate::features::categories::models::{AttributeValues, Category, CategoryType};
use crate::features::categories::store::CategoryStore;
use crate::features::categories::validation::{
    resolve_category_type, CategoryAttributeValidator, CategoryHandlerRegistry,
};

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    handlers: Arc<CategoryHandlerRegistry>,
    attribute_validator: CategoryAttributeValidator,
}

impl CategoryService {
    pub fn new(
        store: Arc<dyn CategoryStore>,
        handlers: Arc<CategoryHandlerRegistry>,
        attribute_validator: CategoryAttributeValidator,
    ) -> Self {
        Self {
            store,
            handlers,
            attribute_validator,
        }
    }

    /// Create a category.
    ///
    /// Structure is resolved first, so a malformed request is reported before
    /// any uniqueness or parent-chain rule runs.
    pub async fn save(&self, request: CreateCategoryDto) -> Result<Category> {
        let category_type =
            resolve_category_type(request.parent_id, request.attributes.as_ref())?;

        if let Some(declared) = request.category_type {
            if declared != category_type {
                return Err(AppError::Validation(
                    "Category type does not match category structure.".to_string(),
                ));
            }
        }

        self.handlers
            .get_handler(category_type)?
            .handle(&request)
            .await?;

        let category = self
            .store
            .save(request.into_category(category_type))
            .await?;

        tracing::info!(
            "Created {} category '{}' ({})",
            category.category_type,
            category.code,
            category.id
        );

        Ok(category)
    }

    /// Get category by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        self.store.find_by_id_or_not_found(id).await
    }

    /// Direct children of an existing category
    pub async fn find_children(&self, id: Uuid) -> Result<Vec<Category>> {
        let parent = self.store.find_by_id_or_not_found(id).await?;
        self.store.find_by_parent_id(parent.id).await
    }

    /// List categories, optionally restricted to one type
    pub async fn list(&self, category_type: Option<CategoryType>) -> Result<Vec<Category>> {
        match category_type {
            Some(category_type) => self.store.find_all_by_type(category_type).await,
            None => self.store.find_all().await,
        }
    }

    /// List all categories as tree structure
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.store.find_all().await?;
        Ok(CategoryTreeDto::build_tree(categories))
    }

    pub async fn validate_attributes(&self, id: Uuid, values: &AttributeValues) -> Result<()> {
        self.attribute_validator
            .validate_category_attributes(id, values)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::{AttributeDefinition, AttributeSchema, AttributeType};
    use crate::shared::test_helpers::{CategoryFixture, FailingCategoryStore};

    fn service() -> Arc<CategoryService> {
        CategoryFixture::new().service
    }

    fn request(
        code: &str,
        parent_id: Option<Uuid>,
        attributes: Option<AttributeSchema>,
    ) -> CreateCategoryDto {
        CreateCategoryDto {
            title: code.replace('-', " "),
            code: code.to_string(),
            parent_id,
            category_type: None,
            attributes,
        }
    }

    fn ram_schema() -> AttributeSchema {
        AttributeSchema::from([(
            "ram".to_string(),
            AttributeDefinition::enumeration(true, ["8GB", "16GB"]),
        )])
    }

    #[tokio::test]
    async fn test_save_builds_three_level_tree() {
        let service = service();

        let parent = service.save(request("electronics", None, None)).await.unwrap();
        let sub = service
            .save(request("laptops", Some(parent.id), None))
            .await
            .unwrap();
        let child = service
            .save(request("gaming-laptops", Some(sub.id), Some(ram_schema())))
            .await
            .unwrap();

        assert_eq!(parent.category_type, CategoryType::Parent);
        assert_eq!(sub.category_type, CategoryType::Sub);
        assert_eq!(child.category_type, CategoryType::Child);
        assert_eq!(service.find_by_id(child.id).await.unwrap(), child);

        let children = service.find_children(parent.id).await.unwrap();
        assert_eq!(children, vec![sub]);

        let tree = service.list_tree().await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children[0].children[0].id, child.id);

        let leaves = service.list(Some(CategoryType::Child)).await.unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(service.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_structure_error_reported_before_uniqueness() {
        let service = service();
        service.save(request("electronics", None, None)).await.unwrap();

        // Duplicate code and an invalid structure: structure wins
        let result = service
            .save(request("electronics", None, Some(ram_schema())))
            .await;
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid category structure."),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_child_of_child_is_rejected() {
        let service = service();
        let parent = service.save(request("electronics", None, None)).await.unwrap();
        let child = service
            .save(request("gaming-laptops", Some(parent.id), Some(ram_schema())))
            .await
            .unwrap();

        let result = service.save(request("rgb-keyboards", Some(child.id), None)).await;
        assert!(matches!(result, Err(AppError::CategoryType(_))));

        let result = service
            .save(request("rgb-mice", Some(child.id), Some(ram_schema())))
            .await;
        assert!(matches!(result, Err(AppError::CategoryType(_))));
    }

    #[tokio::test]
    async fn test_declared_type_must_match_structure() {
        let service = service();
        let mut dto = request("electronics", None, None);
        dto.category_type = Some(CategoryType::Child);

        assert!(matches!(
            service.save(dto).await,
            Err(AppError::Validation(msg)) if msg == "Category type does not match category structure."
        ));
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let service = service();
        match service.find_by_id(Uuid::now_v7()).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Category not found."),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_validate_attributes_through_service() {
        let service = service();
        let parent = service.save(request("electronics", None, None)).await.unwrap();
        let schema = AttributeSchema::from([
            (
                "ram".to_string(),
                AttributeDefinition::enumeration(true, ["8GB", "16GB"]),
            ),
            (
                "screen".to_string(),
                AttributeDefinition::new(AttributeType::Range, true),
            ),
        ]);
        let child = service
            .save(request("laptops", Some(parent.id), Some(schema)))
            .await
            .unwrap();

        let result = service
            .validate_attributes(child.id, &AttributeValues::new())
            .await;
        assert!(matches!(
            result,
            Err(AppError::InvalidAttributes(keys)) if keys == vec!["ram", "screen"]
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_not_reported_as_domain_error() {
        let service = CategoryFixture::with_store(Arc::new(FailingCategoryStore)).service;

        let result = service.save(request("laptops", Some(Uuid::now_v7()), None)).await;
        assert!(matches!(result, Err(AppError::Database(_))));

        let result = service.save(request("electronics", None, None)).await;
        assert!(matches!(result, Err(AppError::Database(_))));

        assert!(matches!(
            service.find_by_id(Uuid::now_v7()).await,
            Err(AppError::Database(_))
        ));
    }
}
