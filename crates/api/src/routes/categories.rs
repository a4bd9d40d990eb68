//! Category taxonomy routes.
//!
//! The public list feeds the client's category grid; the admin CRUD is the
//! write side of the same table.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::Category;
use persistence::repositories::CategoryRepository;

/// Request body for creating a category.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 20, message = "Color must be 1-20 characters"))]
    pub color: String,

    #[validate(length(min = 1, max = 20, message = "Background color must be 1-20 characters"))]
    pub bg_color: String,

    #[validate(length(min = 1, max = 10, message = "Emoji must be 1-10 characters"))]
    pub emoji: String,

    #[validate(length(min = 1, max = 50, message = "Icon name must be 1-50 characters"))]
    pub icon_name: String,

    pub description: Option<String>,
}

/// Request body for updating a category; absent fields stay unchanged.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: Option<String>,

    pub color: Option<String>,
    pub bg_color: Option<String>,
    pub emoji: Option<String>,
    pub icon_name: Option<String>,
    pub description: Option<String>,
}

/// GET /users/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let repo = CategoryRepository::new(state.pool.clone());
    let categories = repo.list().await?.into_iter().map(Category::from).collect();
    Ok(Json(categories))
}

/// GET /admin/categories
pub async fn admin_list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    list_categories(State(state)).await
}

/// POST /admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    request.validate()?;

    let repo = CategoryRepository::new(state.pool.clone());
    let category = repo
        .create(
            request.name.trim(),
            &request.color,
            &request.bg_color,
            &request.emoji,
            &request.icon_name,
            request.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(Category::from(category))))
}

/// PATCH /admin/categories/:id
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    request.validate()?;

    let repo = CategoryRepository::new(state.pool.clone());
    let category = repo
        .update(
            id,
            request.name.as_deref().map(str::trim),
            request.color.as_deref(),
            request.bg_color.as_deref(),
            request.emoji.as_deref(),
            request.icon_name.as_deref(),
            request.description.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(Category::from(category)))
}

/// DELETE /admin/categories/:id
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = CategoryRepository::new(state.pool.clone());
    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Category not found".to_string()))
    }
}
