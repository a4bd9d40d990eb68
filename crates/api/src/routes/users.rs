//! Public user directory routes.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use domain::services::category_match;
use persistence::repositories::{UserDirectoryRow, UserRepository};

/// Query parameters for the directory listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryQuery {
    /// Restrict to accounts with this role (e.g. `PROVIDER`).
    pub role: Option<String>,
    /// Category id or display name; names are matched after normalization.
    pub category: Option<String>,
}

/// Provider profile embedded in directory and login responses.
///
/// `id` is the profile id bookings reference, distinct from the account id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfileSummary {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub base_price: i64,
    pub experience_years: i32,
    pub city: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

/// A directory entry: the account plus its provider profile, if any.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_profile: Option<ProviderProfileSummary>,
}

impl DirectoryEntry {
    fn from_row(row: UserDirectoryRow) -> Self {
        let provider_profile = row.profile_id.map(|profile_id| ProviderProfileSummary {
            id: profile_id,
            category_id: row.category_id,
            category_name: row.category_name.clone(),
            base_price: row.base_price.unwrap_or(0),
            experience_years: row.experience_years.unwrap_or(0),
            city: row.city.clone(),
            bio: row.bio.clone(),
            profile_image: row.profile_image.clone(),
        });

        Self {
            id: row.id,
            full_name: row.full_name,
            phone: row.phone,
            role: row.role,
            provider_profile,
        }
    }
}

/// Whether a directory row matches a category filter.
///
/// An exact profile category id wins; otherwise the filter is matched
/// against the category display name after normalization, so `kirtankars`
/// finds providers in the `Kirtankar` category.
fn matches_category(row: &UserDirectoryRow, filter: &str) -> bool {
    if let Ok(id) = Uuid::parse_str(filter) {
        return row.category_id == Some(id);
    }

    match &row.category_name {
        Some(name) => category_match::category_matches(filter, name),
        None => false,
    }
}

/// Applies the directory filters. Accounts with the provider role but no
/// profile are never listed as providers.
fn directory_entries(rows: Vec<UserDirectoryRow>, query: &DirectoryQuery) -> Vec<DirectoryEntry> {
    let listing_providers = query
        .role
        .as_deref()
        .map(|r| r.eq_ignore_ascii_case("PROVIDER"))
        .unwrap_or(false)
        || query.category.is_some();

    rows.into_iter()
        .filter(|row| !listing_providers || row.profile_id.is_some())
        .filter(|row| match &query.category {
            Some(filter) => matches_category(row, filter),
            None => true,
        })
        .map(DirectoryEntry::from_row)
        .collect()
}

/// GET /users
///
/// Public directory with optional `role` and `category` filters.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> Result<Json<Vec<DirectoryEntry>>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let rows = repo.list_directory(query.role.as_deref()).await?;
    Ok(Json(directory_entries(rows, &query)))
}
