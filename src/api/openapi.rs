//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models, services};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meetpoint Server",
        version = "0.3.0",
        description = "API server for a local-events app: place cache, destination events, and participation"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Frontend configuration
        api::client_config::client_config,
        // Auth endpoints
        services::google_oauth::auth_status,
        // Place endpoints
        api::places::list_places,
        api::places::save_place,
        // Destination endpoints
        api::destinations::list_destinations,
        api::destinations::create_destination,
        api::destinations::get_destination,
        api::destinations::delete_destination,
        api::destinations::cancel_destination,
        // Participation endpoints
        api::participation::participate,
        api::participation::withdraw,
        // User endpoints
        api::users::get_user,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Config
            api::client_config::ClientConfigResponse,
            // Auth
            models::AuthStatusResponse,
            // Places
            models::SavePlaceRequest,
            models::PlaceResponse,
            // Destinations
            models::EventStatus,
            models::CreateDestinationRequest,
            models::DestinationResponse,
            models::DestinationSummary,
            models::DestinationDetail,
            // Participation
            models::ParticipationKind,
            models::ParticipateRequest,
            models::ParticipantInfo,
            // Users
            models::PublicUserProfile,
        )
    ),
    tags(
        (name = "Health", description = "Service health and readiness"),
        (name = "Config", description = "Frontend bootstrap configuration"),
        (name = "Auth", description = "Session status"),
        (name = "Places", description = "Place cache"),
        (name = "Destinations", description = "Destination events"),
        (name = "Participation", description = "Join / interest records"),
        (name = "Users", description = "Public profiles"),
    )
)]
pub struct ApiDoc;
