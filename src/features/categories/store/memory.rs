//! In-memory category store.
//!
//! Not durable: state lives in a `HashMap` behind a `tokio::sync::RwLock` and
//! is lost on restart. Used for local development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CategoryStore;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryType};

#[derive(Clone, Default)]
pub struct InMemoryCategoryStore {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_title(mut categories: Vec<Category>) -> Vec<Category> {
    categories.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    categories
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn find_by_parent_id(&self, parent_id: Uuid) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(sorted_by_title(
            categories
                .values()
                .filter(|c| c.parent_id == Some(parent_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(sorted_by_title(categories.values().cloned().collect()))
    }

    async fn find_all_by_type(&self, category_type: CategoryType) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(sorted_by_title(
            categories
                .values()
                .filter(|c| c.category_type == category_type)
                .cloned()
                .collect(),
        ))
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool> {
        let categories = self.categories.read().await;
        Ok(categories.values().any(|c| c.code.eq_ignore_ascii_case(code)))
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool> {
        let title = title.to_lowercase();
        let categories = self.categories.read().await;
        Ok(categories.values().any(|c| c.title.to_lowercase() == title))
    }

    async fn save(&self, category: Category) -> Result<Category> {
        let mut categories = self.categories.write().await;

        // Same uniqueness the Postgres indexes enforce, checked under the write lock
        let title = category.title.to_lowercase();
        let clash = categories.values().any(|c| {
            c.id == category.id
                || c.code.eq_ignore_ascii_case(&category.code)
                || c.title.to_lowercase() == title
        });
        if clash {
            return Err(AppError::Conflict("Category already exists.".to_string()));
        }

        categories.insert(category.id, category.clone());
        Ok(category)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(title: &str, code: &str, parent_id: Option<Uuid>) -> Category {
        let category_type = if parent_id.is_some() {
            CategoryType::Sub
        } else {
            CategoryType::Parent
        };
        Category::new(title.to_string(), code.to_string(), parent_id, category_type, None)
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let store = InMemoryCategoryStore::new();
        let saved = store
            .save(category("Electronics", "electronics", None))
            .await
            .unwrap();

        let found = store.find_by_id(saved.id).await.unwrap();
        assert_eq!(found, Some(saved));
        assert!(store.find_by_id(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exists_checks_ignore_case() {
        let store = InMemoryCategoryStore::new();
        store
            .save(category("Electronics", "electronics", None))
            .await
            .unwrap();

        assert!(store.exists_by_code("ELECTRONICS").await.unwrap());
        assert!(store.exists_by_title("electronics").await.unwrap());
        assert!(!store.exists_by_code("books").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_code() {
        let store = InMemoryCategoryStore::new();
        store
            .save(category("Electronics", "electronics", None))
            .await
            .unwrap();

        let result = store
            .save(category("Other electronics", "Electronics", None))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_children_sorted_by_title() {
        let store = InMemoryCategoryStore::new();
        let root = store
            .save(category("Electronics", "electronics", None))
            .await
            .unwrap();
        store
            .save(category("Phones", "phones", Some(root.id)))
            .await
            .unwrap();
        store
            .save(category("Computers", "computers", Some(root.id)))
            .await
            .unwrap();

        let children = store.find_by_parent_id(root.id).await.unwrap();
        let titles: Vec<_> = children.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Computers", "Phones"]);

        let subs = store.find_all_by_type(CategoryType::Sub).await.unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(store.find_all().await.unwrap().len(), 3);
    }
}
