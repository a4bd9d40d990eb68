//! Provider profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A service professional's public profile.
///
/// Distinct from the owning account: `id` is the profile id that bookings
/// must reference, `user_id` is the login account. Mixing the two up is the
/// classic "record not found" failure, so the distinction is kept explicit
/// everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub full_name: String,
    /// Base price in integer rupees.
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
