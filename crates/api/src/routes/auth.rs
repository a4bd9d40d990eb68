//! Signup and login routes.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;
use crate::routes::users::ProviderProfileSummary;
use domain::models::Role;
use domain::services::category_match;
use persistence::entities::ProviderProfileEntity;
use persistence::repositories::{CategoryRepository, ProviderRepository, UserRepository};
use shared::validation::{validate_phone, MIN_PASSWORD_LENGTH};

/// Request body for account signup.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    /// Phone number, the login identifier.
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Account role: USER or PROVIDER. Admin accounts are provisioned
    /// directly, never through signup.
    pub role: String,

    /// Provider category (id or display name); required for providers.
    pub category: Option<String>,

    /// Years of experience; providers only.
    pub experience: Option<i32>,

    /// Base price in integer rupees; providers only.
    pub price: Option<i64>,

    /// Home city; providers only.
    pub city: Option<String>,
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// The account payload clients persist after signup/login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_profile: Option<ProviderProfileSummary>,
}

/// Response body for successful signup or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserResponse,
}

fn profile_summary(profile: ProviderProfileEntity) -> ProviderProfileSummary {
    ProviderProfileSummary {
        id: profile.id,
        category_id: Some(profile.category_id),
        category_name: None,
        base_price: profile.base_price,
        experience_years: profile.experience_years,
        city: profile.city,
        bio: profile.bio,
        profile_image: profile.profile_image,
    }
}

/// Resolves a signup category given as an id or a display name.
async fn resolve_category(
    repo: &CategoryRepository,
    filter: &str,
) -> Result<Uuid, ApiError> {
    if let Ok(id) = Uuid::parse_str(filter) {
        if repo.find_by_id(id).await?.is_some() {
            return Ok(id);
        }
        return Err(ApiError::Validation("Unknown category".to_string()));
    }

    let categories = repo.list().await?;
    categories
        .into_iter()
        .find(|c| category_match::category_matches(filter, &c.name))
        .map(|c| c.id)
        .ok_or_else(|| ApiError::Validation("Unknown category".to_string()))
}

/// POST /users/signup
///
/// Creates the account; provider signups also create the provider profile
/// in the same transaction. Returns a token so the client is logged in
/// immediately.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let role: Role = request
        .role
        .parse()
        .map_err(|_| ApiError::Validation("Role must be USER or PROVIDER".to_string()))?;
    if role == Role::Admin {
        return Err(ApiError::Validation(
            "Admin accounts cannot be created through signup".to_string(),
        ));
    }

    if request.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let password_hash = shared::password::hash_password(&request.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    let users = UserRepository::new(state.pool.clone());
    let phone = request.phone.trim();

    if users.find_by_phone(phone).await?.is_some() {
        return Err(ApiError::Conflict("Phone already registered".to_string()));
    }

    let (user, profile) = match role {
        Role::Provider => {
            let category = request.category.as_deref().ok_or_else(|| {
                ApiError::Validation("Provider signup requires a category".to_string())
            })?;
            let categories = CategoryRepository::new(state.pool.clone());
            let category_id = resolve_category(&categories, category).await?;

            let (user, profile) = users
                .create_provider_with_profile(
                    request.full_name.trim(),
                    phone,
                    &password_hash,
                    category_id,
                    request.price.unwrap_or(0).max(0),
                    request.experience.unwrap_or(0).max(0),
                    request.city.as_deref(),
                )
                .await?;
            (user, Some(profile))
        }
        _ => {
            let user = users
                .create_user(request.full_name.trim(), phone, &password_hash, role.as_str())
                .await?;
            (user, None)
        }
    };

    let jwt_config =
        UserAuth::create_jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;
    let access_token = jwt_config
        .generate_access_token(user.id, &user.role)
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

    let response = AuthResponse {
        access_token,
        user: UserResponse {
            id: user.id,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            provider_profile: profile.map(profile_summary),
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /users/login
///
/// Verifies the phone/password pair and returns a token plus the account
/// payload. Provider accounts embed their profile; `providerProfile.id`
/// is what clients keep as the booking target id.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_phone(request.phone.trim())
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid phone or password".to_string()))?;

    // Provisioned accounts without a password cannot log in this way
    let hash = user.password_hash.as_deref().ok_or_else(|| {
        ApiError::Unauthorized("Invalid phone or password".to_string())
    })?;

    let verified = shared::password::verify_password(&request.password, hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
    if !verified {
        return Err(ApiError::Unauthorized(
            "Invalid phone or password".to_string(),
        ));
    }

    if !user.is_active {
        return Err(ApiError::Forbidden("Account is deactivated".to_string()));
    }

    users.update_last_login(user.id, chrono::Utc::now()).await?;

    let profile = if user.role == Role::Provider.as_str() {
        ProviderRepository::new(state.pool.clone())
            .find_by_user_id(user.id)
            .await?
    } else {
        None
    };

    let jwt_config =
        UserAuth::create_jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;
    let access_token = jwt_config
        .generate_access_token(user.id, &user.role)
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

    Ok(Json(AuthResponse {
        access_token,
        user: UserResponse {
            id: user.id,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            provider_profile: profile.map(profile_summary),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_request() -> SignupRequest {
        SignupRequest {
            full_name: "Pandit Ram Sharma".to_string(),
            phone: "9876543210".to_string(),
            password: "bhakti123".to_string(),
            role: "PROVIDER".to_string(),
            category: Some("Pandit".to_string()),
            experience: Some(10),
            price: Some(5000),
            city: Some("Nashik".to_string()),
        }
    }

    #[test]
    fn test_signup_request_valid() {
        assert!(signup_request().validate().is_ok());
    }

    #[test]
    fn test_signup_request_bad_phone() {
        let mut request = signup_request();
        request.phone = "12345".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_signup_request_short_password() {
        let mut request = signup_request();
        request.password = "om".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_signup_request_empty_name() {
        let mut request = signup_request();
        request.full_name = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_request_requires_fields() {
        let request = LoginRequest {
            phone: String::new(),
            password: "secret".to_string(),
        };
        assert!(request.validate().is_err());

        let request = LoginRequest {
            phone: "9876543210".to_string(),
            password: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_auth_response_shape() {
        let response = AuthResponse {
            access_token: "token".to_string(),
            user: UserResponse {
                id: Uuid::new_v4(),
                full_name: "Anita Joshi".to_string(),
                phone: "9812345678".to_string(),
                role: "USER".to_string(),
                provider_profile: None,
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("accessToken").is_some());
        assert!(json["user"].get("fullName").is_some());
        // Non-providers carry no profile key at all
        assert!(json["user"].get("providerProfile").is_none());
    }
}
