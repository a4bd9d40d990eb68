//! Account repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ProviderProfileEntity, UserEntity};
use crate::metrics::QueryTimer;

/// Repository for account-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

/// User row joined with its provider profile (if any) and the profile's
/// category, for the public directory listing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserDirectoryRow {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub role: String,
    pub profile_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub base_price: Option<i64>,
    pub experience_years: Option<i32>,
    pub city: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, full_name, phone, password_hash, role, is_active,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by phone number (the login identifier).
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_phone");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, full_name, phone, password_hash, role, is_active,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE phone = $1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new account.
    pub async fn create_user(
        &self,
        full_name: &str,
        phone: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (full_name, phone, password_hash, role, is_active)
            VALUES ($1, $2, $3, $4, true)
            RETURNING id, full_name, phone, password_hash, role, is_active,
                      created_at, updated_at, last_login_at
            "#,
        )
        .bind(full_name)
        .bind(phone)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a provider account together with its profile in one
    /// transaction, so a half-registered provider can never exist.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_provider_with_profile(
        &self,
        full_name: &str,
        phone: &str,
        password_hash: &str,
        category_id: Uuid,
        base_price: i64,
        experience_years: i32,
        city: Option<&str>,
    ) -> Result<(UserEntity, ProviderProfileEntity), sqlx::Error> {
        let timer = QueryTimer::new("create_provider_with_profile");
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (full_name, phone, password_hash, role, is_active)
            VALUES ($1, $2, $3, 'PROVIDER', true)
            RETURNING id, full_name, phone, password_hash, role, is_active,
                      created_at, updated_at, last_login_at
            "#,
        )
        .bind(full_name)
        .bind(phone)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let profile = sqlx::query_as::<_, ProviderProfileEntity>(
            r#"
            INSERT INTO provider_profiles
                (user_id, category_id, full_name, base_price, experience_years, city)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, category_id, full_name, base_price, experience_years,
                      city, bio, profile_image, gallery_images, gallery_videos,
                      created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(category_id)
        .bind(full_name)
        .bind(base_price)
        .bind(experience_years)
        .bind(city)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok((user, profile))
    }

    /// Update a user's last login timestamp.
    pub async fn update_last_login(
        &self,
        user_id: Uuid,
        last_login_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("update_user_last_login");
        sqlx::query(
            r#"
            UPDATE users
            SET last_login_at = $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(last_login_at)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }

    /// List active users with their provider profile and category joined in.
    ///
    /// When `role` is given, only users with that role are returned. Category
    /// filtering is done by the caller so it can apply id equality or the
    /// normalized-name match as appropriate.
    pub async fn list_directory(
        &self,
        role: Option<&str>,
    ) -> Result<Vec<UserDirectoryRow>, sqlx::Error> {
        let timer = QueryTimer::new("list_user_directory");
        let result = sqlx::query_as::<_, UserDirectoryRow>(
            r#"
            SELECT u.id, u.full_name, u.phone, u.role,
                   p.id AS profile_id, p.category_id, c.name AS category_name,
                   p.base_price, p.experience_years, p.city, p.bio, p.profile_image
            FROM users u
            LEFT JOIN provider_profiles p ON p.user_id = u.id
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE u.is_active = true
              AND ($1::text IS NULL OR u.role = $1)
            ORDER BY u.created_at
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
