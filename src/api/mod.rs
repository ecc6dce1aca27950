//! API endpoint modules.

pub mod client_config;
pub mod destinations;
pub mod health;
pub mod openapi;
pub mod participation;
pub mod places;
pub mod users;

pub use client_config::configure_routes as configure_client_config_routes;
pub use destinations::configure_routes as configure_destination_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use participation::configure_routes as configure_participation_routes;
pub use places::configure_routes as configure_place_routes;
pub use users::configure_routes as configure_user_routes;
