//! Provider profile and gallery routes.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_gallery_upload;
use crate::services::storage::{self, MediaKind};
use domain::models::ProviderProfile;
use persistence::entities::ProviderProfileEntity;
use persistence::repositories::ProviderRepository;
use shared::validation::validate_amount;

/// Request body for profile updates; absent fields stay unchanged.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProviderRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,

    pub base_price: Option<i64>,
    pub experience_years: Option<i32>,
    pub city: Option<String>,
    pub bio: Option<String>,
}

/// Request body for gallery media removal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGalleryRequest {
    pub image_url: String,
}

/// Loads a profile and checks the caller may mutate it.
///
/// A provider may only touch their own profile; admins may touch any.
async fn load_owned_profile(
    repo: &ProviderRepository,
    profile_id: Uuid,
    auth: &UserAuth,
) -> Result<ProviderProfileEntity, ApiError> {
    let profile = repo
        .find_by_id(profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Provider not found".to_string()))?;

    if profile.user_id != auth.user_id && auth.role != "ADMIN" {
        return Err(ApiError::Forbidden(
            "You can only modify your own profile".to_string(),
        ));
    }

    Ok(profile)
}

/// GET /providers/:id
pub async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProviderProfile>, ApiError> {
    let repo = ProviderRepository::new(state.pool.clone());
    let profile = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Provider not found".to_string()))?;

    Ok(Json(ProviderProfile::from(profile)))
}

/// PATCH /providers/:id
pub async fn update_provider(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: UserAuth,
    Json(request): Json<UpdateProviderRequest>,
) -> Result<Json<ProviderProfile>, ApiError> {
    request.validate()?;

    if let Some(price) = request.base_price {
        validate_amount(price).map_err(|e| {
            ApiError::Validation(e.message.map(|m| m.to_string()).unwrap_or_default())
        })?;
    }

    let repo = ProviderRepository::new(state.pool.clone());
    load_owned_profile(&repo, id, &auth).await?;

    let updated = repo
        .update_profile(
            id,
            request.full_name.as_deref().map(str::trim),
            request.base_price,
            request.experience_years,
            request.city.as_deref(),
            request.bio.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Provider not found".to_string()))?;

    Ok(Json(ProviderProfile::from(updated)))
}

/// PATCH /providers/:id/photo
///
/// Multipart profile photo replacement; the photo size ceiling applies.
pub async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: UserAuth,
    mut multipart: Multipart,
) -> Result<Json<ProviderProfile>, ApiError> {
    let repo = ProviderRepository::new(state.pool.clone());
    load_owned_profile(&repo, id, &auth).await?;

    let mut stored_url: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        if field.file_name().is_none() {
            continue;
        }

        let file_name = field.file_name().unwrap_or("photo").to_string();
        let content_type = field.content_type().map(|c| c.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read upload: {}", e)))?;

        storage::validate_media(
            MediaKind::Photo,
            content_type.as_deref(),
            data.len(),
            &state.config.limits,
        )
        .map_err(|e| ApiError::Validation(e.to_string()))?;

        let url = storage::save_upload(&state.config.limits.uploads_dir, id, &file_name, &data)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        stored_url = Some(url);
        break;
    }

    let url =
        stored_url.ok_or_else(|| ApiError::Validation("No photo file provided".to_string()))?;

    let updated = repo
        .set_profile_image(id, &url)
        .await?
        .ok_or_else(|| ApiError::NotFound("Provider not found".to_string()))?;

    Ok(Json(ProviderProfile::from(updated)))
}

/// POST /providers/:id/gallery
///
/// Multipart upload with a `type` field (`photos` or `videos`) and one or
/// more `files` fields. Every file must pass the MIME and size checks for
/// the declared kind before anything is stored.
pub async fn upload_gallery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: UserAuth,
    mut multipart: Multipart,
) -> Result<Json<ProviderProfile>, ApiError> {
    let repo = ProviderRepository::new(state.pool.clone());
    load_owned_profile(&repo, id, &auth).await?;

    let mut kind: Option<MediaKind> = None;
    let mut files: Vec<(String, Option<String>, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some("type") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Invalid type field: {}", e)))?;
                kind = Some(MediaKind::from_field(&value).ok_or_else(|| {
                    ApiError::Validation("Type must be 'photos' or 'videos'".to_string())
                })?);
            }
            Some("files") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(|c| c.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Failed to read upload: {}", e)))?;
                files.push((file_name, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    let kind = kind
        .ok_or_else(|| ApiError::Validation("Missing 'type' field".to_string()))?;
    if files.is_empty() {
        return Err(ApiError::Validation("No files provided".to_string()));
    }

    // Validate every file before storing any
    for (_, content_type, data) in &files {
        storage::validate_media(kind, content_type.as_deref(), data.len(), &state.config.limits)
            .map_err(|e| ApiError::Validation(e.to_string()))?;
    }

    let mut urls = Vec::with_capacity(files.len());
    for (file_name, _, data) in &files {
        let url = storage::save_upload(&state.config.limits.uploads_dir, id, file_name, data)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        record_gallery_upload(kind.as_str());
        urls.push(url);
    }

    let updated = repo
        .add_gallery_media(id, &urls, kind == MediaKind::Video)
        .await?
        .ok_or_else(|| ApiError::NotFound("Provider not found".to_string()))?;

    Ok(Json(ProviderProfile::from(updated)))
}

/// PATCH /providers/:id/gallery/delete
///
/// Removes the URL from both gallery arrays and best-effort deletes the
/// stored file.
pub async fn delete_gallery_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: UserAuth,
    Json(request): Json<DeleteGalleryRequest>,
) -> Result<Json<ProviderProfile>, ApiError> {
    if request.image_url.trim().is_empty() {
        return Err(ApiError::Validation("imageUrl is required".to_string()));
    }

    let repo = ProviderRepository::new(state.pool.clone());
    load_owned_profile(&repo, id, &auth).await?;

    let updated = repo
        .remove_gallery_media(id, &request.image_url)
        .await?
        .ok_or_else(|| ApiError::NotFound("Provider not found".to_string()))?;

    storage::remove_upload(&state.config.limits.uploads_dir, &request.image_url).await;

    Ok(Json(ProviderProfile::from(updated)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_all_optional() {
        let request = UpdateProviderRequest {
            full_name: None,
            base_price: None,
            experience_years: None,
            city: None,
            bio: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_empty_name_rejected() {
        let request = UpdateProviderRequest {
            full_name: Some(String::new()),
            base_price: None,
            experience_years: None,
            city: None,
            bio: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_delete_gallery_request_parses_camel_case() {
        let request: DeleteGalleryRequest =
            serde_json::from_str(r#"{"imageUrl": "/uploads/abc/def.jpg"}"#).unwrap();
        assert_eq!(request.image_url, "/uploads/abc/def.jpg");
    }
}
