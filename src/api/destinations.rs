//! Destination event API handlers.

use std::collections::HashMap;

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::SessionAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateDestinationRequest, DestinationDetail, DestinationResponse, DestinationSummary,
    EventStatus, ParticipantInfo, ParticipationKind, has_elapsed,
};

/// List the caller's events: everything they organize plus everything they
/// joined or marked interest in, soonest first.
#[utoipa::path(
    get,
    path = "/api/destinations",
    tag = "Destinations",
    responses(
        (status = 200, description = "The caller's events", body = [DestinationSummary]),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
    )
)]
#[get("/destinations")]
pub async fn list_destinations(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let created = pool.destinations_by_organizer(auth.user_id).await?;

    let participations = pool.participations_for_user(auth.user_id).await?;
    let kind_by_event: HashMap<Uuid, ParticipationKind> = participations
        .iter()
        .filter_map(|p| ParticipationKind::parse(&p.participation_type).map(|k| (p.event_id, k)))
        .collect();

    let event_ids: Vec<Uuid> = participations.iter().map(|p| p.event_id).collect();
    let participating = pool.destinations_by_ids(&event_ids).await?;

    // Resolve organizer display names in one query
    let mut organizer_ids: Vec<Uuid> = created
        .iter()
        .chain(participating.iter())
        .map(|d| d.user_id)
        .collect();
    organizer_ids.sort_unstable();
    organizer_ids.dedup();

    let organizers = crate::db::users::find_by_ids(pool.connection(), &organizer_ids).await?;
    let name_by_id: HashMap<Uuid, String> = organizers
        .into_iter()
        .map(|u| (u.id, u.name.unwrap_or(u.email)))
        .collect();

    // Combine and deduplicate (an organizer may also participate)
    let mut by_id: HashMap<Uuid, DestinationSummary> = HashMap::new();

    for dest in created {
        let organizer_name = name_by_id.get(&dest.user_id).cloned();
        by_id.insert(
            dest.id,
            DestinationSummary {
                destination: DestinationResponse::from(dest),
                is_organizer: true,
                participation_type: None,
                organizer_name,
            },
        );
    }

    for dest in participating {
        if by_id.contains_key(&dest.id) {
            continue;
        }
        let organizer_name = name_by_id.get(&dest.user_id).cloned();
        let participation_type = kind_by_event.get(&dest.id).copied();
        by_id.insert(
            dest.id,
            DestinationSummary {
                destination: DestinationResponse::from(dest),
                is_organizer: false,
                participation_type,
                organizer_name,
            },
        );
    }

    let mut result: Vec<DestinationSummary> = by_id.into_values().collect();
    result.sort_by_key(|s| (s.destination.scheduled_date, s.destination.scheduled_time));

    Ok(HttpResponse::Ok().json(result))
}

/// Create a destination event.
#[utoipa::path(
    post,
    path = "/api/destinations",
    tag = "Destinations",
    request_body = CreateDestinationRequest,
    responses(
        (status = 201, description = "Event created", body = DestinationResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
    )
)]
#[post("/destinations")]
pub async fn create_destination(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    body: web::Json<CreateDestinationRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.place_name.trim().is_empty() {
        return Err(AppError::InvalidInput("place_name must not be empty".to_string()));
    }
    super::places::validate_coordinates(req.latitude, req.longitude)?;

    let dest = pool.insert_destination(auth.user_id, req).await?;
    info!(
        "User {} created destination '{}' ({})",
        auth.user_id, dest.place_name, dest.id
    );

    Ok(HttpResponse::Created().json(DestinationResponse::from(dest)))
}

/// Get a single destination with organizer info and participants.
///
/// Public: event detail pages are shareable by URL.
#[utoipa::path(
    get,
    path = "/api/destinations/{id}",
    tag = "Destinations",
    params(("id" = Uuid, Path, description = "Destination ID")),
    responses(
        (status = 200, description = "Event detail", body = DestinationDetail),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse),
    )
)]
#[get("/destinations/{id}")]
pub async fn get_destination(
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let dest = pool
        .get_destination_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Destination {}", id)))?;

    let organizer = crate::db::users::find_by_id(pool.connection(), dest.user_id)
        .await?
        .map(Into::into);

    let records = pool.participants_for_event(id).await?;

    // Attach user profiles in one query
    let mut user_ids: Vec<Uuid> = records.iter().map(|p| p.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();
    let users = crate::db::users::find_by_ids(pool.connection(), &user_ids).await?;
    let profile_by_id: HashMap<Uuid, crate::models::PublicUserProfile> =
        users.into_iter().map(|u| (u.id, u.into())).collect();

    let participants: Vec<ParticipantInfo> = records
        .into_iter()
        .filter_map(|p| {
            let kind = ParticipationKind::parse(&p.participation_type)?;
            Some(ParticipantInfo {
                id: p.id,
                event_id: p.event_id,
                user_id: p.user_id,
                participation_type: kind,
                created_at: p.created_at,
                user: profile_by_id.get(&p.user_id).cloned(),
            })
        })
        .collect();

    let joined: Vec<ParticipantInfo> = participants
        .iter()
        .filter(|p| p.participation_type == ParticipationKind::Joined)
        .cloned()
        .collect();
    let interested: Vec<ParticipantInfo> = participants
        .iter()
        .filter(|p| p.participation_type == ParticipationKind::Interested)
        .cloned()
        .collect();

    let detail = DestinationDetail {
        destination: DestinationResponse::from(dest),
        organizer,
        joined_count: joined.len(),
        interested_count: interested.len(),
        participants,
        joined,
        interested,
    };

    Ok(HttpResponse::Ok().json(detail))
}

/// Delete a destination. Organizer only; participant rows cascade.
#[utoipa::path(
    delete,
    path = "/api/destinations/{id}",
    tag = "Destinations",
    params(("id" = Uuid, Path, description = "Destination ID")),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Not the organizer", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse),
    )
)]
#[delete("/destinations/{id}")]
pub async fn delete_destination(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let dest = pool
        .get_destination_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Destination {}", id)))?;

    if dest.user_id != auth.user_id {
        return Err(AppError::Forbidden(
            "Only the organizer can delete this event".to_string(),
        ));
    }

    pool.delete_destination(id).await?;
    info!("User {} deleted destination {}", auth.user_id, id);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// Cancel a destination. Organizer only; cancelled events are never touched
/// by the status sweep, even after their date elapses.
#[utoipa::path(
    patch,
    path = "/api/destinations/{id}/cancel",
    tag = "Destinations",
    params(("id" = Uuid, Path, description = "Destination ID")),
    responses(
        (status = 200, description = "Event cancelled", body = DestinationResponse),
        (status = 400, description = "Already cancelled or already past", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Not the organizer", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse),
    )
)]
#[patch("/destinations/{id}/cancel")]
pub async fn cancel_destination(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let dest = pool
        .get_destination_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Destination {}", id)))?;

    if dest.user_id != auth.user_id {
        return Err(AppError::Forbidden(
            "Only the organizer can cancel this event".to_string(),
        ));
    }

    if dest.status == EventStatus::Cancelled.as_str() {
        return Err(AppError::InvalidInput(
            "Destination is already cancelled".to_string(),
        ));
    }

    // Same end-of-day rule the sweep applies to all-day events
    if has_elapsed(dest.scheduled_date, dest.scheduled_time, Utc::now().naive_utc()) {
        return Err(AppError::InvalidInput(
            "Cannot cancel past events".to_string(),
        ));
    }

    let updated = pool.set_destination_status(id, EventStatus::Cancelled).await?;
    info!("User {} cancelled destination {}", auth.user_id, id);

    Ok(HttpResponse::Ok().json(DestinationResponse::from(updated)))
}

/// Configure destination routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_destinations)
        .service(create_destination)
        .service(get_destination)
        .service(delete_destination)
        .service(cancel_destination);
}
