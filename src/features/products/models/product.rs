use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::features::categories::models::AttributeValues;

/// Domain model for a product listed under a CHILD category
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub quantity: i32,
    pub price: Decimal,
    pub owner_id: String,
    pub category_id: Uuid,
    pub attributes: AttributeValues,
    pub active: bool,
    /// Optimistic-concurrency counter, bumped by the store on every update
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}
