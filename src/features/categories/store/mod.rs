//! Persistence for categories.
//!
//! Services only see [`CategoryStore`]; the backend is picked at start-up.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryType};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCategoryStore;
pub use postgres::PgCategoryStore;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    /// Direct children of `parent_id`, ordered by title
    async fn find_by_parent_id(&self, parent_id: Uuid) -> Result<Vec<Category>>;

    /// Every category, ordered by title
    async fn find_all(&self) -> Result<Vec<Category>>;

    async fn find_all_by_type(&self, category_type: CategoryType) -> Result<Vec<Category>>;

    /// Case-insensitive
    async fn exists_by_code(&self, code: &str) -> Result<bool>;

    /// Case-insensitive
    async fn exists_by_title(&self, title: &str) -> Result<bool>;

    /// Inserts a new category. A code or title clash is reported as `Conflict`.
    async fn save(&self, category: Category) -> Result<Category>;

    fn backend_name(&self) -> &'static str;

    async fn find_by_id_or_not_found(&self, id: Uuid) -> Result<Category> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found.".to_string()))
    }
}
