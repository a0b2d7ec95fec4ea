//! Persistence for products.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::products::models::Product;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::PgProductStore;

pub(crate) const STALE_VERSION_MESSAGE: &str = "Product was modified concurrently.";

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>>;

    /// Insert or update.
    ///
    /// An unknown id is inserted with version 0. A known id is updated only
    /// when `product.version` equals the stored version, which is then
    /// incremented; otherwise `StaleVersion` is returned.
    async fn save(&self, product: Product) -> Result<Product>;

    fn backend_name(&self) -> &'static str;
}
