use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;
use uuid::Uuid;

use super::AttributeSchema;
use crate::core::error::{AppError, Result};
use crate::features::categories::validation::resolve_category_type;

/// Position of a category in the PARENT -> SUB -> CHILD tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "category_type", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryType {
    Parent,
    Sub,
    /// Leaf level; the only type products may reference
    Child,
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryType::Parent => write!(f, "PARENT"),
            CategoryType::Sub => write!(f, "SUB"),
            CategoryType::Child => write!(f, "CHILD"),
        }
    }
}

/// Domain model for a catalog category
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub code: String,
    pub parent_id: Option<Uuid>,
    /// Type recorded at creation; see [`Category::resolved_type`]
    pub category_type: CategoryType,
    pub attributes: Option<AttributeSchema>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(
        title: String,
        code: String,
        parent_id: Option<Uuid>,
        category_type: CategoryType,
        attributes: Option<AttributeSchema>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title,
            code,
            parent_id,
            category_type,
            attributes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Type derived from structure, checked against the stored type.
    ///
    /// Derivation is authoritative; a disagreeing stored value is reported as
    /// a data-integrity error rather than trusted.
    pub fn resolved_type(&self) -> Result<CategoryType> {
        let derived = resolve_category_type(self.parent_id, self.attributes.as_ref())?;
        if derived != self.category_type {
            tracing::error!(
                "Category {} stored as {} but structure resolves to {}",
                self.id,
                self.category_type,
                derived
            );
            return Err(AppError::Integrity(
                "Stored category type does not match category structure.".to_string(),
            ));
        }
        Ok(derived)
    }

    /// Declared attribute schema; empty for PARENT and SUB categories
    pub fn schema(&self) -> AttributeSchema {
        self.attributes.clone().unwrap_or_default()
    }
}
