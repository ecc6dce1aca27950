//! User models for Google OAuth authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User stored in database.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub google_id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public user profile (returned by /api/users/{id} and embedded in event
/// details). Never exposes the OAuth provider identity.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicUserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUserProfile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            picture_url: u.picture_url,
            created_at: u.created_at,
        }
    }
}

/// Google userinfo payload (oauth2/v2/userinfo).
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Session JWT claims.
///
/// Carries the profile fields the auth-status endpoint reports so that
/// answering it never requires a database read.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub exp: usize,
    pub iat: usize,
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Response for /api/auth/status.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl AuthStatusResponse {
    /// The anonymous response.
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            user_id: None,
            email: None,
            name: None,
            picture: None,
        }
    }
}
