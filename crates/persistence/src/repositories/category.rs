//! Category repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CategoryEntity;
use crate::metrics::QueryTimer;

/// Repository for the admin-managed category taxonomy.
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories in insertion order.
    pub async fn list(&self) -> Result<Vec<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_categories");
        let result = sqlx::query_as::<_, CategoryEntity>(
            r#"
            SELECT id, name, color, bg_color, emoji, icon_name, description,
                   created_at, updated_at
            FROM categories
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a category by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_category_by_id");
        let result = sqlx::query_as::<_, CategoryEntity>(
            r#"
            SELECT id, name, color, bg_color, emoji, icon_name, description,
                   created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new category.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        color: &str,
        bg_color: &str,
        emoji: &str,
        icon_name: &str,
        description: Option<&str>,
    ) -> Result<CategoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_category");
        let result = sqlx::query_as::<_, CategoryEntity>(
            r#"
            INSERT INTO categories (name, color, bg_color, emoji, icon_name, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, color, bg_color, emoji, icon_name, description,
                      created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(color)
        .bind(bg_color)
        .bind(emoji)
        .bind(icon_name)
        .bind(description)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a category. `None` fields keep their current value.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        color: Option<&str>,
        bg_color: Option<&str>,
        emoji: Option<&str>,
        icon_name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_category");
        let result = sqlx::query_as::<_, CategoryEntity>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                color = COALESCE($3, color),
                bg_color = COALESCE($4, bg_color),
                emoji = COALESCE($5, emoji),
                icon_name = COALESCE($6, icon_name),
                description = COALESCE($7, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, color, bg_color, emoji, icon_name, description,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(color)
        .bind(bg_color)
        .bind(emoji)
        .bind(icon_name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a category. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_category");
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
