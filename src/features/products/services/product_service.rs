use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::ProductCategoryGate;
use crate::core::error::{AppError, Result};
use crate::features::auth::CurrentUser;
use crate::features::products::dtos::{CreateProductDto, UpdateProductDto};
use crate::features::products::models::Product;
use crate::features::products::store::ProductStore;

/// Service for product operations
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    gate: ProductCategoryGate,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>, gate: ProductCategoryGate) -> Self {
        Self { store, gate }
    }

    /// List a new product owned by the caller
    pub async fn create(&self, user: &impl CurrentUser, dto: CreateProductDto) -> Result<Product> {
        self.gate
            .check_product(dto.category_id, &dto.attributes)
            .await?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::now_v7(),
            title: dto.title.trim().to_string(),
            description: dto.description,
            quantity: dto.quantity,
            price: dto.price,
            owner_id: user.user_id().to_string(),
            category_id: dto.category_id,
            attributes: dto.attributes,
            active: true,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let product = self.store.save(product).await?;
        tracing::info!("Created product {} for owner {}", product.id, product.owner_id);
        Ok(product)
    }

    /// Apply the present fields of `dto`; only the owner may update.
    ///
    /// Category and attributes are checked before anything is changed. New
    /// attributes are validated against the target category, which is the
    /// new one when `category_id` is also given. Moving to another category
    /// without new attributes validates the stored ones.
    pub async fn update(
        &self,
        user: &impl CurrentUser,
        id: Uuid,
        dto: UpdateProductDto,
    ) -> Result<Product> {
        let mut product = self.find_by_id(id).await?;

        if !product.is_owned_by(user.user_id()) {
            tracing::warn!("User {} tried to edit product {}", user.user_id(), id);
            return Err(AppError::Forbidden(
                "Only owner can edit its product.".to_string(),
            ));
        }

        let target_category = match dto.category_id {
            Some(category_id) => self.gate.check_eligible(category_id).await?.id,
            None => product.category_id,
        };

        // A category move re-checks the kept attributes against the new schema
        let values_to_check = match &dto.attributes {
            Some(attributes) => Some(attributes),
            None if target_category != product.category_id => Some(&product.attributes),
            None => None,
        };
        if let Some(values) = values_to_check {
            self.gate.check_product(target_category, values).await?;
        }

        if let Some(title) = dto.title {
            product.title = title.trim().to_string();
        }
        if let Some(description) = dto.description {
            product.description = description;
        }
        if let Some(quantity) = dto.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = dto.price {
            product.price = price;
        }
        if let Some(attributes) = dto.attributes {
            product.attributes = attributes;
        }
        if let Some(active) = dto.active {
            product.active = active;
        }
        if let Some(version) = dto.version {
            product.version = version;
        }
        product.category_id = target_category;

        let product = self.store.save(product).await?;
        tracing::info!("Updated product {} to version {}", product.id, product.version);
        Ok(product)
    }

    /// Get product by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<Product> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found.".to_string()))
    }
}
