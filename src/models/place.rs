//! Place cache models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request to cache a place picked in the maps widget.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SavePlaceRequest {
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Option<f64>,
    /// External place identifier from the maps provider.
    pub google_place_id: Option<String>,
}

/// Cached place.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlaceResponse {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Option<f64>,
    pub google_place_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::place::Model> for PlaceResponse {
    fn from(m: crate::entity::place::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            address: m.address,
            latitude: m.latitude,
            longitude: m.longitude,
            rating: m.rating,
            google_place_id: m.google_place_id,
            created_at: m.created_at,
        }
    }
}
