use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::products::models::Product;

const PRICE_MAX_INTEGER_DIGITS: u32 = 8;
const PRICE_MAX_FRACTION_DIGITS: u32 = 2;

/// Price must be positive with at most 8 integer and 2 fraction digits
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("price_min")
            .with_message("Price must be greater or equal to 0.".into()));
    }

    let normalized = price.normalize();
    let integer_digits = normalized.trunc().abs().to_string().trim_start_matches('0').len() as u32;
    if integer_digits > PRICE_MAX_INTEGER_DIGITS || normalized.scale() > PRICE_MAX_FRACTION_DIGITS {
        return Err(ValidationError::new("price_digits").with_message(
            "Price must have up to 8 digits before the decimal point and 2 after.".into(),
        ));
    }
    Ok(())
}

/// Request DTO for listing a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    #[validate(
        length(min = 2, max = 100, message = "Title must be between 2 and 100 characters."),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    pub title: String,

    #[validate(length(
        min = 5,
        max = 250,
        message = "Description must be between 5 and 250 characters."
    ))]
    pub description: String,

    #[validate(range(min = 0, message = "Minimal quantity is one."))]
    pub quantity: i32,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "1499.99")]
    pub price: Decimal,

    pub category_id: Uuid,

    #[validate(length(min = 1, message = "Minimum 1 attribute is required."))]
    pub attributes: BTreeMap<String, Vec<String>>,
}

/// Request DTO for updating a product; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductDto {
    #[validate(
        length(min = 2, max = 100, message = "Title must be between 2 and 100 characters."),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[validate(length(
        min = 5,
        max = 250,
        message = "Description must be between 5 and 250 characters."
    ))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Minimal quantity is one."))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,

    #[validate(custom(function = "validate_price"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "1499.99")]
    pub price: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Minimum 1 attribute is required."))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, Vec<String>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Version the client last read; defaults to the currently stored one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub quantity: i32,
    #[schema(value_type = String, example = "1499.99")]
    pub price: Decimal,
    pub owner_id: String,
    pub category_id: Uuid,
    pub attributes: BTreeMap<String, Vec<String>>,
    pub active: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            quantity: p.quantity,
            price: p.price,
            owner_id: p.owner_id,
            category_id: p.category_id,
            attributes: p.attributes,
            active: p.active,
            version: p.version,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
