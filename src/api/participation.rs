//! Participation API handlers (join / mark interest / withdraw).

use actix_web::{HttpResponse, delete, post, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::SessionAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{ParticipantInfo, ParticipateRequest, ParticipationKind};

/// Join or mark interest in an event.
///
/// At most one participation record exists per (event, user) pair; calling
/// this again with a different kind updates the record in place.
#[utoipa::path(
    post,
    path = "/api/events/{id}/participate",
    tag = "Participation",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = ParticipateRequest,
    responses(
        (status = 200, description = "Participation recorded", body = ParticipantInfo),
        (status = 400, description = "Invalid participation type", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse),
    )
)]
#[post("/events/{id}/participate")]
pub async fn participate(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
    body: web::Json<ParticipateRequest>,
) -> AppResult<HttpResponse> {
    let event_id = path.into_inner();
    let kind = body.into_inner().kind;

    // Check the event exists before writing a participation row
    pool.get_destination_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {}", event_id)))?;

    let record = pool
        .upsert_participation(event_id, auth.user_id, kind)
        .await?;
    info!(
        "User {} participation in event {}: {}",
        auth.user_id, event_id, kind
    );

    let kind = ParticipationKind::parse(&record.participation_type)
        .ok_or_else(|| AppError::Database("Unexpected participation type".to_string()))?;

    Ok(HttpResponse::Ok().json(ParticipantInfo {
        id: record.id,
        event_id: record.event_id,
        user_id: record.user_id,
        participation_type: kind,
        created_at: record.created_at,
        user: None,
    }))
}

/// Withdraw from an event.
#[utoipa::path(
    delete,
    path = "/api/events/{id}/participate",
    tag = "Participation",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Participation removed"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
    )
)]
#[delete("/events/{id}/participate")]
pub async fn withdraw(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let event_id = path.into_inner();

    let removed = pool.delete_participation(event_id, auth.user_id).await?;
    if removed {
        info!("User {} withdrew from event {}", auth.user_id, event_id);
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true, "removed": removed })))
}

/// Configure participation routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(participate).service(withdraw);
}
