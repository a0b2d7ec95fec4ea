use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{ProductStore, STALE_VERSION_MESSAGE};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::AttributeValues;
use crate::features::products::models::Product;

const RETURNING_COLUMNS: &str = "id, title, description, quantity, price, owner_id, category_id, \
     attributes, active, version, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    title: String,
    description: String,
    quantity: i32,
    price: Decimal,
    owner_id: String,
    category_id: Uuid,
    attributes: Json<AttributeValues>,
    active: bool,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            quantity: row.quantity,
            price: row.price,
            owner_id: row.owner_id,
            category_id: row.category_id,
            attributes: row.attributes.0,
            active: row.active,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres-backed product store
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, product: &Product) -> Result<Product> {
        let sql = format!(
            r#"
            INSERT INTO products (id, title, description, quantity, price, owner_id, category_id,
                                  attributes, active, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, $10, $10)
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product.id)
            .bind(&product.title)
            .bind(&product.description)
            .bind(product.quantity)
            .bind(product.price)
            .bind(&product.owner_id)
            .bind(product.category_id)
            .bind(Json(&product.attributes))
            .bind(product.active)
            .bind(product.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert product: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(row.into())
    }

    /// Compare-and-set on `version`; `None` when the stored version moved on
    async fn update(&self, product: &Product) -> Result<Option<Product>> {
        let sql = format!(
            r#"
            UPDATE products
            SET title = $2, description = $3, quantity = $4, price = $5, category_id = $6,
                attributes = $7, active = $8, version = version + 1, updated_at = NOW()
            WHERE id = $1 AND version = $9
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product.id)
            .bind(&product.title)
            .bind(&product.description)
            .bind(product.quantity)
            .bind(product.price)
            .bind(product.category_id)
            .bind(Json(&product.attributes))
            .bind(product.active)
            .bind(product.version)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update product: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(row.map(Product::from))
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", RETURNING_COLUMNS);
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get product by id: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(row.map(Product::from))
    }

    async fn save(&self, product: Product) -> Result<Product> {
        if let Some(updated) = self.update(&product).await? {
            return Ok(updated);
        }

        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(product.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if exists {
            tracing::warn!("Stale write to product {} at version {}", product.id, product.version);
            return Err(AppError::StaleVersion(STALE_VERSION_MESSAGE.to_string()));
        }

        self.insert(&product).await
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
