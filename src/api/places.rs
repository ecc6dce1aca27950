//! Place cache API handlers.

use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{PlaceResponse, SavePlaceRequest};

/// List cached places.
#[utoipa::path(
    get,
    path = "/api/places",
    tag = "Places",
    responses(
        (status = 200, description = "Cached places", body = [PlaceResponse])
    )
)]
#[get("/places")]
pub async fn list_places(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let places = pool.list_places().await?;
    let response: Vec<PlaceResponse> = places.into_iter().map(PlaceResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Cache a place picked in the maps widget.
///
/// Saving a place whose external identifier is already cached returns the
/// existing row.
#[utoipa::path(
    post,
    path = "/api/places",
    tag = "Places",
    request_body = SavePlaceRequest,
    responses(
        (status = 201, description = "Place cached", body = PlaceResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
#[post("/places")]
pub async fn save_place(
    pool: web::Data<DbPool>,
    body: web::Json<SavePlaceRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_coordinates(req.latitude, req.longitude)?;

    let place = pool.insert_place(req).await?;
    info!("Cached place '{}' ({})", place.name, place.id);

    Ok(HttpResponse::Created().json(PlaceResponse::from(place)))
}

/// Reject coordinates outside the WGS84 range.
pub(crate) fn validate_coordinates(latitude: f64, longitude: f64) -> AppResult<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(crate::error::AppError::InvalidInput(
            "latitude must be between -90 and 90".to_string(),
        ));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(crate::error::AppError::InvalidInput(
            "longitude must be between -180 and 180".to_string(),
        ));
    }
    Ok(())
}

/// Configure place routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_places).service(save_place);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(validate_coordinates(52.52, 13.405).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert!(validate_coordinates(90.5, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
    }
}
