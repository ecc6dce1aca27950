//! Business logic services.

pub mod event_status;
pub mod google_oauth;

pub use event_status::start_event_status_task;
pub use google_oauth::{
    configure_routes as configure_oauth_routes,
    configure_session_routes as configure_auth_status_routes,
};
