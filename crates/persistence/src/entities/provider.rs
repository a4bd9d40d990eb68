//! Provider profile entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the provider_profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ProviderProfileEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub full_name: String,
    pub base_price: i64,
    pub experience_years: i32,
    pub city: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub gallery_images: Vec<String>,
    pub gallery_videos: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProviderProfileEntity> for domain::models::ProviderProfile {
    fn from(entity: ProviderProfileEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            category_id: entity.category_id,
            full_name: entity.full_name,
            base_price: entity.base_price,
            experience_years: entity.experience_years,
            city: entity.city,
            bio: entity.bio,
            profile_image: entity.profile_image,
            gallery_images: entity.gallery_images,
            gallery_videos: entity.gallery_videos,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
