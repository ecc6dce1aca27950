//! Google OAuth routes for web UI authentication.
//!
//! Login issues an HS256 session JWT in an HttpOnly cookie; the token carries
//! the profile fields the status endpoint reports, so no server-side session
//! state exists.
//!
//! Endpoints:
//! 1. GET /auth/google — Redirect to Google (with CSRF `state`)
//! 2. GET /auth/google/callback — Verify state, exchange code, upsert user, set cookie
//! 3. GET /auth/logout — Clear the session cookie
//! 4. GET /api/auth/status — Report the current session, if any

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, get, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::user::{AuthStatusResponse, GoogleUserInfo, SessionClaims, User};

/// Session cookie name (HS256 JWT).
pub const SESSION_COOKIE: &str = "meetpoint_session";
/// OAuth CSRF state cookie — stores the random `state` parameter
/// sent to Google, verified on callback to prevent login CSRF.
const OAUTH_STATE_COOKIE: &str = "meetpoint_oauth_state";
/// Session JWT issuer.
pub const SESSION_ISSUER: &str = "meetpoint";
/// HTTP connect timeout for Google API calls.
const HTTP_CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);
/// HTTP total timeout for Google API calls.
const HTTP_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Configure OAuth routes (root scope: the redirect URIs registered with
/// the OAuth client live outside /api).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(google_login).service(google_callback).service(logout);
}

/// Configure session routes (under the /api scope).
pub fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(auth_status);
}

/// Build an HTTP client with timeouts.
fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .timeout(HTTP_REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client for OAuth")
}

/// Generate a cryptographically random string.
fn generate_random_hex() -> String {
    let random_bytes: [u8; 32] = rand::random();
    hex::encode(random_bytes)
}

// ============================================================================
// Endpoints
// ============================================================================

/// Redirect to Google's OAuth authorization page.
///
/// GET /auth/google
#[get("/auth/google")]
pub async fn google_login(config: web::Data<Config>) -> AppResult<HttpResponse> {
    let oauth = &config.google_oauth;
    if !oauth.enabled {
        return Err(AppError::InvalidInput(
            "Google OAuth is not configured".to_string(),
        ));
    }

    let client_id = oauth.client_id.as_ref().ok_or_else(|| {
        AppError::InvalidInput("Google OAuth client ID not configured".to_string())
    })?;

    let state = generate_random_hex();

    let authorize_url = format!(
        "https://accounts.google.com/o/oauth2/v2/auth?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}&access_type=offline&prompt=consent",
        urlencoding::encode(client_id),
        urlencoding::encode(&oauth.redirect_url),
        urlencoding::encode("openid email profile"),
        urlencoding::encode(&state),
    );

    let mut state_cookie = Cookie::new(OAUTH_STATE_COOKIE, state);
    state_cookie.set_path("/");
    state_cookie.set_http_only(true);
    state_cookie.set_same_site(SameSite::Lax);
    state_cookie.set_secure(config.environment.is_production());

    Ok(HttpResponse::Found()
        .cookie(state_cookie)
        .append_header(("Location", authorize_url))
        .finish())
}

/// Handle the Google OAuth callback.
///
/// GET /auth/google/callback?code=...&state=...
#[get("/auth/google/callback")]
pub async fn google_callback(
    req: HttpRequest,
    query: web::Query<CallbackQuery>,
    config: web::Data<Config>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let oauth = &config.google_oauth;
    if !oauth.enabled {
        return Err(AppError::InvalidInput(
            "Google OAuth is not configured".to_string(),
        ));
    }

    // --- CSRF state verification ---
    let expected_state = req
        .cookie(OAUTH_STATE_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| {
            warn!("OAuth callback: missing state cookie");
            AppError::Unauthorized("OAuth state verification failed".to_string())
        })?;

    let provided_state = query.state.as_deref().unwrap_or("");
    if provided_state.is_empty() || provided_state != expected_state {
        warn!("OAuth callback: state mismatch");
        return Err(AppError::Unauthorized(
            "OAuth state verification failed".to_string(),
        ));
    }

    let client_id = oauth.client_id.as_ref().ok_or_else(|| {
        AppError::InvalidInput("Google OAuth client ID not configured".to_string())
    })?;
    let client_secret = oauth.client_secret.as_ref().ok_or_else(|| {
        AppError::InvalidInput("Google OAuth client secret not configured".to_string())
    })?;

    // --- Exchange code for an access token ---
    let http_client = build_http_client();
    let token_response: TokenResponse = http_client
        .post("https://oauth2.googleapis.com/token")
        .form(&[
            ("code", query.code.as_str()),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.expose_secret()),
            ("redirect_uri", oauth.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| {
            warn!("OAuth: failed to exchange code: {}", e);
            AppError::Unauthorized("Google authentication failed".to_string())
        })?
        .json()
        .await
        .map_err(|e| {
            warn!("OAuth: failed to parse token response: {}", e);
            AppError::Unauthorized("Google authentication failed".to_string())
        })?;

    if let Some(ref err) = token_response.error {
        warn!("OAuth: Google returned error: {}", err);
        return Err(AppError::Unauthorized(
            "Google authentication failed".to_string(),
        ));
    }

    let access_token: SecretString = token_response
        .access_token
        .map(SecretString::from)
        .ok_or_else(|| {
            warn!("OAuth: no access_token in response");
            AppError::Unauthorized("Google authentication failed".to_string())
        })?;

    // --- Fetch user info ---
    let user_info: GoogleUserInfo = http_client
        .get("https://www.googleapis.com/oauth2/v2/userinfo")
        .header(
            "Authorization",
            format!("Bearer {}", access_token.expose_secret()),
        )
        .send()
        .await
        .map_err(|e| {
            warn!("OAuth: failed to fetch user info: {}", e);
            AppError::Unauthorized("Google authentication failed".to_string())
        })?
        .json()
        .await
        .map_err(|e| {
            warn!("OAuth: failed to parse user info: {}", e);
            AppError::Unauthorized("Google authentication failed".to_string())
        })?;

    // --- Upsert user in DB ---
    let user = crate::db::users::upsert_from_google(
        pool.connection(),
        &user_info.id,
        &user_info.email,
        user_info.name.as_deref(),
        user_info.picture.as_deref(),
    )
    .await?;

    info!("Google OAuth login: user='{}' (id={})", user.email, user.id);

    // --- Issue session cookie ---
    let is_prod = config.environment.is_production();
    let session_token =
        create_session_token(&user, &config.session.secret, config.session.ttl_secs)?;

    let mut session_cookie = Cookie::new(SESSION_COOKIE, session_token);
    session_cookie.set_path("/");
    session_cookie.set_http_only(true);
    session_cookie.set_same_site(SameSite::Lax);
    session_cookie.set_secure(is_prod);

    // Clear state cookie
    let mut clear_state = Cookie::new(OAUTH_STATE_COOKIE, "");
    clear_state.set_path("/");
    clear_state.set_http_only(true);
    clear_state.set_same_site(SameSite::Lax);
    clear_state.set_secure(is_prod);

    // Send the browser back where it came from; same-origin paths only
    let redirect_to = query
        .redirect
        .as_deref()
        .filter(|r| r.starts_with('/') && !r.starts_with("//"))
        .unwrap_or("/");

    Ok(HttpResponse::Found()
        .cookie(session_cookie)
        .cookie(clear_state)
        .append_header(("Location", redirect_to.to_string()))
        .finish())
}

/// Logout: clear the session cookie and return to the main page.
///
/// GET /auth/logout
#[get("/auth/logout")]
pub async fn logout(config: web::Data<Config>) -> AppResult<HttpResponse> {
    let mut clear_session = Cookie::new(SESSION_COOKIE, "");
    clear_session.set_path("/");
    clear_session.set_http_only(true);
    clear_session.set_same_site(SameSite::Lax);
    clear_session.set_secure(config.environment.is_production());

    Ok(HttpResponse::Found()
        .cookie(clear_session)
        .append_header(("Location", "/"))
        .finish())
}

/// Get current authentication status from the session cookie.
///
/// GET /api/auth/status
#[utoipa::path(
    get,
    path = "/api/auth/status",
    tag = "Auth",
    responses(
        (status = 200, description = "Authentication status", body = AuthStatusResponse)
    )
)]
#[get("/auth/status")]
pub async fn auth_status(req: HttpRequest, config: web::Data<Config>) -> AppResult<HttpResponse> {
    let token = match req.cookie(SESSION_COOKIE) {
        Some(c) => c.value().to_string(),
        None => return Ok(HttpResponse::Ok().json(AuthStatusResponse::unauthenticated())),
    };

    let claims = match verify_session_token(&token, &config.session.secret) {
        Ok(c) => c,
        Err(_) => return Ok(HttpResponse::Ok().json(AuthStatusResponse::unauthenticated())),
    };

    let user_id = match Uuid::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => return Ok(HttpResponse::Ok().json(AuthStatusResponse::unauthenticated())),
    };

    Ok(HttpResponse::Ok().json(AuthStatusResponse {
        authenticated: true,
        user_id: Some(user_id),
        email: Some(claims.email),
        name: claims.name,
        picture: claims.picture,
    }))
}

// ============================================================================
// Helpers
// ============================================================================

/// Create the session JWT for a logged-in user.
pub fn create_session_token(user: &User, secret: &SecretString, ttl_secs: u64) -> AppResult<String> {
    let now = chrono::Utc::now();
    let exp = now + chrono::Duration::seconds(ttl_secs as i64);

    let claims = SessionClaims {
        sub: user.id.to_string(),
        iss: SESSION_ISSUER.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
        user_id: user.id.to_string(),
        email: user.email.clone(),
        name: user.name.clone(),
        picture: user.picture_url.clone(),
    };

    let key = EncodingKey::from_secret(secret.expose_secret().as_bytes());
    encode(&Header::default(), &claims, &key)
        .map_err(|e| AppError::InvalidInput(format!("Failed to create session token: {}", e)))
}

/// Verify a session JWT and return its claims.
pub fn verify_session_token(token: &str, secret: &SecretString) -> Result<SessionClaims, String> {
    let key = DecodingKey::from_secret(secret.expose_secret().as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[SESSION_ISSUER]);
    validation.validate_aud = false;

    let token_data = decode::<SessionClaims>(token, &key, &validation)
        .map_err(|e| format!("Invalid session token: {}", e))?;

    Ok(token_data.claims)
}

// ============================================================================
// Types
// ============================================================================

#[derive(serde::Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    pub state: Option<String>,
    pub redirect: Option<String>,
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            google_id: "109876543210".to_string(),
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
            picture_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_session_token_round_trip() {
        let secret = SecretString::from("test-secret".to_string());
        let user = test_user();

        let token = create_session_token(&user, &secret, 3600).unwrap();
        let claims = verify_session_token(&token, &secret).unwrap();

        assert_eq!(claims.user_id, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.iss, SESSION_ISSUER);
    }

    #[test]
    fn test_session_token_rejects_wrong_secret() {
        let user = test_user();
        let token =
            create_session_token(&user, &SecretString::from("secret-a".to_string()), 3600).unwrap();

        let result = verify_session_token(&token, &SecretString::from("secret-b".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_session_token_rejects_expired() {
        let secret = SecretString::from("test-secret".to_string());
        let user = test_user();

        // exp two hours in the past, well beyond validation leeway
        let now = Utc::now() - chrono::Duration::hours(3);
        let claims = SessionClaims {
            sub: user.id.to_string(),
            iss: SESSION_ISSUER.to_string(),
            exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
            user_id: user.id.to_string(),
            email: user.email.clone(),
            name: None,
            picture: None,
        };
        let key = EncodingKey::from_secret(secret.expose_secret().as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        assert!(verify_session_token(&token, &secret).is_err());
    }
}
