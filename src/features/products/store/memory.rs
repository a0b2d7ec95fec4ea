//! In-memory product store. Not durable; for local development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProductStore, STALE_VERSION_MESSAGE};
use crate::core::error::{AppError, Result};
use crate::features::products::models::Product;

#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn save(&self, mut product: Product) -> Result<Product> {
        let mut products = self.products.write().await;

        match products.get(&product.id) {
            None => product.version = 0,
            Some(stored) if stored.version == product.version => {
                product.version += 1;
                product.created_at = stored.created_at;
                product.updated_at = Utc::now();
            }
            Some(_) => return Err(AppError::StaleVersion(STALE_VERSION_MESSAGE.to_string())),
        }

        products.insert(product.id, product.clone());
        Ok(product)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::AttributeValues;
    use rust_decimal::Decimal;
    use tokio_test::{assert_err, assert_ok};

    fn product() -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::now_v7(),
            title: "Gaming laptop".to_string(),
            description: "Fast and loud".to_string(),
            quantity: 1,
            price: Decimal::new(149_999, 2),
            owner_id: "seller".to_string(),
            category_id: Uuid::now_v7(),
            attributes: AttributeValues::new(),
            active: true,
            version: 7,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_starts_at_version_zero() {
        let store = InMemoryProductStore::new();
        let saved = store.save(product()).await.unwrap();

        assert_eq!(saved.version, 0);
        assert_eq!(store.find_by_id(saved.id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_update_increments_version() {
        let store = InMemoryProductStore::new();
        let mut saved = store.save(product()).await.unwrap();

        saved.quantity = 5;
        let updated = store.save(saved).await.unwrap();
        assert_eq!(updated.version, 1);
        assert_eq!(updated.quantity, 5);
    }

    #[tokio::test]
    async fn test_stale_update_is_rejected() {
        let store = InMemoryProductStore::new();
        let saved = assert_ok!(store.save(product()).await);

        assert_ok!(store.save(saved.clone()).await);
        let err = assert_err!(store.save(saved).await);
        assert!(matches!(
            err,
            AppError::StaleVersion(msg) if msg == "Product was modified concurrently."
        ));
    }
}
