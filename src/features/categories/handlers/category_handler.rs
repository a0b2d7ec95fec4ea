use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, ValidatedJson};
use crate::features::auth::guards::RequireAdmin;
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, ListCategoriesQuery,
    ValidateAttributesDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// Create a category
///
/// The category type is derived from `parentId` and `attributes`:
/// no parent and no attributes is PARENT, a parent without attributes is SUB,
/// a parent with a non-empty attribute schema is CHILD.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Invalid structure, field validation or parent type"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Parent category not found"),
        (status = 409, description = "Category already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    tracing::debug!("Admin {} creating category '{}'", admin.sub, dto.code);

    let category = service.save(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category.into()),
            Some("Category created".to_string()),
            None,
        )),
    ))
}

/// List categories
///
/// Returns categories as flat list or tree structure based on `tree` query param.
/// `type` filters the flat list.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    let (value, total) = if query.tree {
        let tree: Vec<CategoryTreeDto> = service.list_tree().await?;
        let total = tree.len() as i64;
        (to_value(tree)?, total)
    } else {
        let categories: Vec<CategoryResponseDto> = service
            .list(query.category_type)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        let total = categories.len() as i64;
        (to_value(categories)?, total)
    };

    Ok(Json(ApiResponse::success(
        Some(value),
        None,
        Some(Meta { total }),
    )))
}

fn to_value<T: serde::Serialize>(value: T) -> Result<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize categories: {}", e)))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.find_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// List the direct children of a category
#[utoipa::path(
    get,
    path = "/api/categories/{id}/children",
    params(
        ("id" = Uuid, Path, description = "Parent category id")
    ),
    responses(
        (status = 200, description = "Child categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn list_children(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let children = service
        .find_children(id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(ApiResponse::list(children)))
}

/// Check attribute values against a category's schema
///
/// Every failing schema key is listed in `errors`.
#[utoipa::path(
    post,
    path = "/api/categories/{id}/attributes/validate",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body = ValidateAttributesDto,
    responses(
        (status = 200, description = "Attributes are valid"),
        (status = 400, description = "One or more attributes are invalid"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn validate_attributes(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<ValidateAttributesDto>,
) -> Result<Json<ApiResponse<()>>> {
    service.validate_attributes(id, &dto.into_values()).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Attributes are valid".to_string()),
        None,
    )))
}
