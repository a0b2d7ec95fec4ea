use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::models::{Category, CategoryType};
use crate::features::categories::store::{CategoryStore, InMemoryCategoryStore};
use crate::features::products::models::Product;
use crate::features::products::store::ProductStore;
use crate::features::categories::validation::{
    AttributeValidatorRegistry, CategoryAttributeValidator, CategoryHandlerRegistry,
};
use crate::features::categories::CategoryService;
use crate::shared::constants::{ROLE_ADMIN, ROLE_USER};

pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-admin".to_string(),
        roles: vec![ROLE_ADMIN.to_string()],
    }
}

pub fn create_user(sub: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        roles: vec![ROLE_USER.to_string()],
    }
}

/// Wrap `router` so every request carries `user`, standing in for the JWT middleware
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

/// In-memory category stack shared by service and route tests
pub struct CategoryFixture {
    pub store: Arc<dyn CategoryStore>,
    pub attribute_validator: CategoryAttributeValidator,
    pub service: Arc<CategoryService>,
}

impl CategoryFixture {
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryCategoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn CategoryStore>) -> Self {
        let attribute_validator = CategoryAttributeValidator::new(
            Arc::clone(&store),
            Arc::new(AttributeValidatorRegistry::standard()),
        );
        let service = Arc::new(CategoryService::new(
            Arc::clone(&store),
            Arc::new(CategoryHandlerRegistry::standard(Arc::clone(&store))),
            attribute_validator.clone(),
        ));

        Self {
            store,
            attribute_validator,
            service,
        }
    }
}

fn pool_timed_out() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

/// Category store whose reads and writes fail as if the database were down.
///
/// Uniqueness lookups report "not taken" so creation reaches the failing parent lookup.
pub struct FailingCategoryStore;

#[async_trait]
impl CategoryStore for FailingCategoryStore {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Category>> {
        Err(pool_timed_out())
    }

    async fn find_by_parent_id(&self, _parent_id: Uuid) -> Result<Vec<Category>> {
        Err(pool_timed_out())
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        Err(pool_timed_out())
    }

    async fn find_all_by_type(&self, _category_type: CategoryType) -> Result<Vec<Category>> {
        Err(pool_timed_out())
    }

    async fn exists_by_code(&self, _code: &str) -> Result<bool> {
        Ok(false)
    }

    async fn exists_by_title(&self, _title: &str) -> Result<bool> {
        Ok(false)
    }

    async fn save(&self, _category: Category) -> Result<Category> {
        Err(pool_timed_out())
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Product store that fails every call
pub struct FailingProductStore;

#[async_trait]
impl ProductStore for FailingProductStore {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Product>> {
        Err(pool_timed_out())
    }

    async fn save(&self, _product: Product) -> Result<Product> {
        Err(pool_timed_out())
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
