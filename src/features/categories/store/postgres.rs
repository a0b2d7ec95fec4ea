use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

use super::CategoryStore;
use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{AttributeSchema, Category, CategoryType};

const SELECT_COLUMNS: &str = r#"
    SELECT id, title, code, parent_id, category_type, attributes, created_at, updated_at
    FROM categories
"#;

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: Uuid,
    title: String,
    code: String,
    parent_id: Option<Uuid>,
    category_type: CategoryType,
    attributes: Option<Json<AttributeSchema>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            code: row.code,
            parent_id: row.parent_id,
            category_type: row.category_type,
            attributes: row.attributes.map(|Json(schema)| schema),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres-backed category store
#[derive(Clone)]
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_list(
        &self,
        query: QueryAs<'_, Postgres, CategoryRow, PgArguments>,
        what: &str,
    ) -> Result<Vec<Category>> {
        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to {}: {:?}", what, e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Category::from).collect())
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let sql = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by id: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(row.map(Category::from))
    }

    async fn find_by_parent_id(&self, parent_id: Uuid) -> Result<Vec<Category>> {
        let sql = format!("{} WHERE parent_id = $1 ORDER BY title", SELECT_COLUMNS);
        self.fetch_list(
            sqlx::query_as::<_, CategoryRow>(&sql).bind(parent_id),
            "list child categories",
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        let sql = format!("{} ORDER BY title", SELECT_COLUMNS);
        self.fetch_list(sqlx::query_as::<_, CategoryRow>(&sql), "list categories")
            .await
    }

    async fn find_all_by_type(&self, category_type: CategoryType) -> Result<Vec<Category>> {
        let sql = format!("{} WHERE category_type = $1 ORDER BY title", SELECT_COLUMNS);
        self.fetch_list(
            sqlx::query_as::<_, CategoryRow>(&sql).bind(category_type),
            "list categories by type",
        )
        .await
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE LOWER(code) = LOWER($1))",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check category code: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE LOWER(title) = LOWER($1))",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check category title: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn save(&self, category: Category) -> Result<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (id, title, code, parent_id, category_type, attributes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, code, parent_id, category_type, attributes, created_at, updated_at
            "#,
        )
        .bind(category.id)
        .bind(&category.title)
        .bind(&category.code)
        .bind(category.parent_id)
        .bind(category.category_type)
        .bind(category.attributes.as_ref().map(Json))
        .bind(category.created_at)
        .bind(category.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Conflict("Category already exists.".to_string());
            }
            tracing::error!("Failed to insert category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(row.into())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
