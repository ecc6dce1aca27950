//! Frontend bootstrap configuration.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::Config;

/// Configuration the browser frontend needs at startup.
#[derive(Serialize, ToSchema)]
pub struct ClientConfigResponse {
    /// Maps/Places browser API key for the map widget.
    pub maps_api_key: Option<String>,
}

/// Expose frontend configuration.
///
/// The map widget runs in the browser and needs the Maps API key; the server
/// hands it out here instead of baking it into templates.
#[utoipa::path(
    get,
    path = "/api/config",
    tag = "Config",
    responses(
        (status = 200, description = "Frontend configuration", body = ClientConfigResponse)
    )
)]
#[get("/config")]
pub async fn client_config(config: web::Data<Config>) -> HttpResponse {
    HttpResponse::Ok().json(ClientConfigResponse {
        maps_api_key: config.maps_api_key.clone(),
    })
}

/// Configure client-config routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(client_config);
}
