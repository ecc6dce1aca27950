//! Database queries for the place cache.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::place::{self, ActiveModel, Entity as Place};
use crate::error::{AppError, AppResult};
use crate::models::SavePlaceRequest;

use super::DbPool;

impl DbPool {
    /// List all cached places.
    pub async fn list_places(&self) -> AppResult<Vec<place::Model>> {
        let places = Place::find()
            .order_by_asc(place::Column::Name)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list places: {}", e)))?;

        Ok(places)
    }

    /// Cache a place. Re-importing a known external place identifier returns
    /// the existing row instead of inserting a duplicate.
    pub async fn insert_place(&self, req: SavePlaceRequest) -> AppResult<place::Model> {
        if let Some(ref place_id) = req.google_place_id {
            let existing = Place::find()
                .filter(place::Column::GooglePlaceId.eq(place_id.as_str()))
                .one(self.connection())
                .await
                .map_err(|e| AppError::Database(format!("Failed to look up place: {}", e)))?;

            if let Some(m) = existing {
                return Ok(m);
            }
        }

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(req.name),
            address: Set(req.address),
            latitude: Set(req.latitude),
            longitude: Set(req.longitude),
            rating: Set(req.rating),
            google_place_id: Set(req.google_place_id),
            created_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert place: {}", e)))?;

        Ok(result)
    }
}
