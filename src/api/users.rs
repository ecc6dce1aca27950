//! User profile API handlers.

use actix_web::{HttpResponse, get, web};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::PublicUserProfile;

/// Get a user's public profile. The OAuth provider identity is never exposed.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = PublicUserProfile),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse),
    )
)]
#[get("/users/{id}")]
pub async fn get_user(path: web::Path<Uuid>, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let user = crate::db::users::find_by_id(pool.connection(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", id)))?;

    Ok(HttpResponse::Ok().json(PublicUserProfile::from(user)))
}

/// Configure user routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_user);
}
