//! Actix-web extractor for session-cookie authentication.
//!
//! The session is an HS256 JWT issued by the OAuth callback and carried in an
//! HttpOnly cookie. Verification is purely local (signature + expiry), so the
//! extractor never touches the database.

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ErrorResponse;
use crate::models::SessionClaims;
use crate::services::google_oauth::{SESSION_COOKIE, verify_session_token};

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    message: String,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::UNAUTHORIZED).json(ErrorResponse {
            error: "UNAUTHORIZED".to_string(),
            message: self.message.clone(),
        })
    }
}

/// Extractor that requires a valid session.
///
/// Use this in handlers that require authentication:
/// ```ignore
/// async fn protected_handler(auth: SessionAuth) -> impl Responder {
///     // auth.user_id identifies the authenticated user
/// }
/// ```
pub struct SessionAuth {
    pub user_id: Uuid,
    pub claims: SessionClaims,
}

impl FromRequest for SessionAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let config = match req.app_data::<web::Data<Config>>() {
            Some(config) => config,
            None => {
                return ready(Err(AuthError {
                    message: "Internal configuration error".to_string(),
                }));
            }
        };

        let token = match req.cookie(SESSION_COOKIE) {
            Some(c) => c.value().to_string(),
            None => {
                return ready(Err(AuthError {
                    message: "Authentication required".to_string(),
                }));
            }
        };

        let claims = match verify_session_token(&token, &config.session.secret) {
            Ok(claims) => claims,
            Err(_) => {
                return ready(Err(AuthError {
                    message: "Invalid or expired session".to_string(),
                }));
            }
        };

        match Uuid::parse_str(&claims.user_id) {
            Ok(user_id) => ready(Ok(SessionAuth { user_id, claims })),
            Err(_) => ready(Err(AuthError {
                message: "Invalid or expired session".to_string(),
            })),
        }
    }
}
