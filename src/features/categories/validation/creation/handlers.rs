//! Per-type creation rules.
//!
//! Each handler runs after the request's type has been resolved and before
//! anything is persisted. Uniqueness is checked first, then the parent chain.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CreateCategoryDto;
use crate::features::categories::models::CategoryType;
use crate::features::categories::store::CategoryStore;

#[async_trait]
pub trait CategoryCreationHandler: Send + Sync {
    fn category_type(&self) -> CategoryType;

    async fn handle(&self, request: &CreateCategoryDto) -> Result<()>;
}

/// Code and title must both be unused (case-insensitive)
async fn ensure_unique(store: &dyn CategoryStore, request: &CreateCategoryDto) -> Result<()> {
    if store.exists_by_code(&request.code).await?
        || store.exists_by_title(request.title.trim()).await?
    {
        tracing::warn!("Category '{}' already exists", request.code);
        return Err(AppError::Conflict("Category already exists.".to_string()));
    }
    Ok(())
}

/// Load the parent and return its type as derived from its own structure
async fn parent_type(store: &dyn CategoryStore, parent_id: Option<Uuid>) -> Result<CategoryType> {
    let parent_id = parent_id
        .ok_or_else(|| AppError::Validation("Invalid category structure.".to_string()))?;

    let parent = store
        .find_by_id(parent_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Parent category not found.".to_string()))?;

    parent.resolved_type()
}

pub struct ParentCategoryCreationHandler {
    store: Arc<dyn CategoryStore>,
}

impl ParentCategoryCreationHandler {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryCreationHandler for ParentCategoryCreationHandler {
    fn category_type(&self) -> CategoryType {
        CategoryType::Parent
    }

    async fn handle(&self, request: &CreateCategoryDto) -> Result<()> {
        ensure_unique(self.store.as_ref(), request).await
    }
}

pub struct SubCategoryCreationHandler {
    store: Arc<dyn CategoryStore>,
}

impl SubCategoryCreationHandler {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryCreationHandler for SubCategoryCreationHandler {
    fn category_type(&self) -> CategoryType {
        CategoryType::Sub
    }

    async fn handle(&self, request: &CreateCategoryDto) -> Result<()> {
        ensure_unique(self.store.as_ref(), request).await?;

        if parent_type(self.store.as_ref(), request.parent_id).await? == CategoryType::Child {
            tracing::warn!("Rejected SUB category '{}' under a CHILD parent", request.code);
            return Err(AppError::CategoryType(
                "Sub category shouldn't have child category as parent.".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct ChildCategoryCreationHandler {
    store: Arc<dyn CategoryStore>,
}

impl ChildCategoryCreationHandler {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryCreationHandler for ChildCategoryCreationHandler {
    fn category_type(&self) -> CategoryType {
        CategoryType::Child
    }

    async fn handle(&self, request: &CreateCategoryDto) -> Result<()> {
        ensure_unique(self.store.as_ref(), request).await?;

        if parent_type(self.store.as_ref(), request.parent_id).await? == CategoryType::Child {
            tracing::warn!("Rejected CHILD category '{}' under a CHILD parent", request.code);
            return Err(AppError::CategoryType(
                "Child category shouldn't have child category as parent.".to_string(),
            ));
        }

        // First malformed entry in key order
        if let Some(message) = request
            .schema()
            .iter()
            .find_map(|(key, definition)| definition.shape_error(key))
        {
            return Err(AppError::Validation(message));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::{
        AttributeDefinition, AttributeSchema, AttributeType, Category,
    };
    use crate::features::categories::store::InMemoryCategoryStore;

    fn request(code: &str, parent_id: Option<Uuid>, attributes: Option<AttributeSchema>) -> CreateCategoryDto {
        CreateCategoryDto {
            title: code.replace('-', " "),
            code: code.to_string(),
            parent_id,
            category_type: None,
            attributes,
        }
    }

    fn schema() -> AttributeSchema {
        AttributeSchema::from([(
            "ram".to_string(),
            AttributeDefinition::enumeration(true, ["8GB", "16GB"]),
        )])
    }

    async fn seed(store: &InMemoryCategoryStore) -> (Category, Category, Category) {
        let parent = store
            .save(Category::new(
                "electronics".to_string(),
                "electronics".to_string(),
                None,
                CategoryType::Parent,
                None,
            ))
            .await
            .unwrap();
        let sub = store
            .save(Category::new(
                "laptops".to_string(),
                "laptops".to_string(),
                Some(parent.id),
                CategoryType::Sub,
                None,
            ))
            .await
            .unwrap();
        let child = store
            .save(Category::new(
                "gaming laptops".to_string(),
                "gaming-laptops".to_string(),
                Some(sub.id),
                CategoryType::Child,
                Some(schema()),
            ))
            .await
            .unwrap();
        (parent, sub, child)
    }

    #[tokio::test]
    async fn test_parent_handler_rejects_duplicate_code() {
        let store = Arc::new(InMemoryCategoryStore::new());
        seed(&store).await;
        let handler = ParentCategoryCreationHandler::new(store);

        let result = handler.handle(&request("ELECTRONICS", None, None)).await;
        assert!(matches!(result, Err(AppError::Conflict(msg)) if msg == "Category already exists."));

        assert!(handler.handle(&request("books", None, None)).await.is_ok());
    }

    #[tokio::test]
    async fn test_parent_handler_rejects_duplicate_title() {
        let store = Arc::new(InMemoryCategoryStore::new());
        seed(&store).await;
        let handler = ParentCategoryCreationHandler::new(store);

        let mut dto = request("consumer-electronics", None, None);
        dto.title = "Electronics".to_string();
        assert!(matches!(handler.handle(&dto).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_sub_handler_parent_chain() {
        let store = Arc::new(InMemoryCategoryStore::new());
        let (parent, _, child) = seed(&store).await;
        let handler = SubCategoryCreationHandler::new(store);

        assert!(handler
            .handle(&request("phones", Some(parent.id), None))
            .await
            .is_ok());

        match handler.handle(&request("accessories", Some(child.id), None)).await {
            Err(AppError::CategoryType(msg)) => {
                assert_eq!(msg, "Sub category shouldn't have child category as parent.")
            }
            other => panic!("expected category type error, got {:?}", other),
        }

        match handler.handle(&request("tablets", Some(Uuid::now_v7()), None)).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Parent category not found."),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_child_handler_parent_chain() {
        let store = Arc::new(InMemoryCategoryStore::new());
        let (parent, sub, child) = seed(&store).await;
        let handler = ChildCategoryCreationHandler::new(store);

        assert!(handler
            .handle(&request("office-laptops", Some(sub.id), Some(schema())))
            .await
            .is_ok());
        assert!(handler
            .handle(&request("gadgets", Some(parent.id), Some(schema())))
            .await
            .is_ok());

        match handler
            .handle(&request("rgb-laptops", Some(child.id), Some(schema())))
            .await
        {
            Err(AppError::CategoryType(msg)) => {
                assert_eq!(msg, "Child category shouldn't have child category as parent.")
            }
            other => panic!("expected category type error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_child_handler_uniqueness_before_parent_check() {
        let store = Arc::new(InMemoryCategoryStore::new());
        seed(&store).await;
        let handler = ChildCategoryCreationHandler::new(store);

        let result = handler
            .handle(&request("gaming-laptops", Some(Uuid::now_v7()), Some(schema())))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_child_handler_rejects_enum_without_values() {
        let store = Arc::new(InMemoryCategoryStore::new());
        let (_, sub, _) = seed(&store).await;
        let handler = ChildCategoryCreationHandler::new(store);

        let malformed = AttributeSchema::from([(
            "color".to_string(),
            AttributeDefinition::new(AttributeType::Enum, true),
        )]);
        match handler
            .handle(&request("desk-lamps", Some(sub.id), Some(malformed)))
            .await
        {
            Err(AppError::Validation(msg)) => assert_eq!(
                msg,
                "Attribute 'color' of type ENUM must declare allowed values."
            ),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
