//! Provider profile repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ProviderProfileEntity;
use crate::metrics::QueryTimer;

const PROFILE_COLUMNS: &str = "id, user_id, category_id, full_name, base_price, \
     experience_years, city, bio, profile_image, gallery_images, gallery_videos, \
     created_at, updated_at";

/// Repository for provider profiles and their galleries.
#[derive(Clone)]
pub struct ProviderRepository {
    pool: PgPool,
}

impl ProviderRepository {
    /// Creates a new ProviderRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by its own id (the id bookings reference).
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ProviderProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_provider_by_id");
        let result = sqlx::query_as::<_, ProviderProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM provider_profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a profile by the owning account id.
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProviderProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_provider_by_user_id");
        let result = sqlx::query_as::<_, ProviderProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM provider_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update profile fields. `None` fields keep their current value.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_profile(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        base_price: Option<i64>,
        experience_years: Option<i32>,
        city: Option<&str>,
        bio: Option<&str>,
    ) -> Result<Option<ProviderProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_provider_profile");
        let result = sqlx::query_as::<_, ProviderProfileEntity>(&format!(
            r#"
            UPDATE provider_profiles
            SET full_name = COALESCE($2, full_name),
                base_price = COALESCE($3, base_price),
                experience_years = COALESCE($4, experience_years),
                city = COALESCE($5, city),
                bio = COALESCE($6, bio),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(full_name)
        .bind(base_price)
        .bind(experience_years)
        .bind(city)
        .bind(bio)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace the profile photo URL.
    pub async fn set_profile_image(
        &self,
        id: Uuid,
        image_url: &str,
    ) -> Result<Option<ProviderProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_provider_profile_image");
        let result = sqlx::query_as::<_, ProviderProfileEntity>(&format!(
            r#"
            UPDATE provider_profiles
            SET profile_image = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Append uploaded media URLs to the photo or video gallery.
    pub async fn add_gallery_media(
        &self,
        id: Uuid,
        urls: &[String],
        is_video: bool,
    ) -> Result<Option<ProviderProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("add_gallery_media");
        let column = if is_video {
            "gallery_videos"
        } else {
            "gallery_images"
        };
        let result = sqlx::query_as::<_, ProviderProfileEntity>(&format!(
            r#"
            UPDATE provider_profiles
            SET {column} = array_cat({column}, $2), updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(urls)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove a media URL from both galleries.
    pub async fn remove_gallery_media(
        &self,
        id: Uuid,
        url: &str,
    ) -> Result<Option<ProviderProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("remove_gallery_media");
        let result = sqlx::query_as::<_, ProviderProfileEntity>(&format!(
            r#"
            UPDATE provider_profiles
            SET gallery_images = array_remove(gallery_images, $2),
                gallery_videos = array_remove(gallery_videos, $2),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
