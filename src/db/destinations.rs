//! Database queries for destination events.

use chrono::{NaiveDateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::destination::{self, ActiveModel, Entity as Destination};
use crate::error::{AppError, AppResult};
use crate::models::{CreateDestinationRequest, EventStatus};

use super::DbPool;

impl DbPool {
    /// Insert a new destination event for an organizer.
    pub async fn insert_destination(
        &self,
        user_id: Uuid,
        req: CreateDestinationRequest,
    ) -> AppResult<destination::Model> {
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            place_name: Set(req.place_name),
            address: Set(req.address),
            latitude: Set(req.latitude),
            longitude: Set(req.longitude),
            google_place_id: Set(req.google_place_id),
            place_type: Set(req.place_type),
            rating: Set(req.rating),
            scheduled_date: Set(req.scheduled_date),
            scheduled_time: Set(req.scheduled_time),
            status: Set(EventStatus::Active.as_str().to_string()),
            created_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert destination: {}", e)))?;

        Ok(result)
    }

    /// Get a destination by ID.
    pub async fn get_destination_by_id(&self, id: Uuid) -> AppResult<Option<destination::Model>> {
        let result = Destination::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get destination: {}", e)))?;

        Ok(result)
    }

    /// List events a user organizes, soonest first.
    pub async fn destinations_by_organizer(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<destination::Model>> {
        let result = Destination::find()
            .filter(destination::Column::UserId.eq(user_id))
            .order_by_asc(destination::Column::ScheduledDate)
            .order_by_asc(destination::Column::ScheduledTime)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list destinations: {}", e)))?;

        Ok(result)
    }

    /// Fetch several destinations at once (the caller's participations).
    pub async fn destinations_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<destination::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Destination::find()
            .filter(destination::Column::Id.is_in(ids.iter().copied()))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list destinations: {}", e)))?;

        Ok(result)
    }

    /// Update a destination's status.
    pub async fn set_destination_status(
        &self,
        id: Uuid,
        status: EventStatus,
    ) -> AppResult<destination::Model> {
        let dest = self
            .get_destination_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Destination {}", id)))?;

        let mut active: ActiveModel = dest.into();
        active.status = Set(status.as_str().to_string());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update destination status: {}", e)))?;

        Ok(result)
    }

    /// Delete a destination. Participant rows cascade in the database.
    /// Returns false when no row matched.
    pub async fn delete_destination(&self, id: Uuid) -> AppResult<bool> {
        let result = Destination::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete destination: {}", e)))?;

        Ok(result.rows_affected > 0)
    }

    /// The sweep: one bulk UPDATE moving every active event whose scheduled
    /// moment lies strictly before `now` to 'past'. All-day events (NULL
    /// scheduled_time) count as running until the end of their date. Rows
    /// already 'past' or 'cancelled' are never touched, so re-running after
    /// a successful sweep changes nothing.
    ///
    /// Returns the number of rows updated.
    pub async fn mark_elapsed_past(&self, now: NaiveDateTime) -> AppResult<u64> {
        let result = Destination::update_many()
            .col_expr(
                destination::Column::Status,
                Expr::value(EventStatus::Past.as_str()),
            )
            .filter(destination::Column::Status.eq(EventStatus::Active.as_str()))
            .filter(Expr::cust_with_values(
                "(scheduled_date + COALESCE(scheduled_time, TIME '23:59:59')) < $1",
                [now],
            ))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to mark elapsed events: {}", e)))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn sweep_now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 3, 11)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_sweep_is_one_bulk_update_scoped_to_active() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 2,
                ..Default::default()
            }])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let updated = pool.mark_elapsed_past(sweep_now()).await.unwrap();
        assert_eq!(updated, 2);

        let log = pool.conn.into_transaction_log();
        assert_eq!(log.len(), 1, "sweep must issue a single statement");

        let sql = format!("{:?}", log);
        assert!(sql.contains("UPDATE"));
        assert!(sql.contains("destinations"));
        // Only active rows qualify; cancelled and past rows stay untouched.
        assert!(sql.contains("active"));
        // All-day rows compare against end of day.
        assert!(sql.contains("COALESCE"));
    }

    #[tokio::test]
    async fn test_sweep_with_no_qualifying_rows_is_a_noop() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 0,
                ..Default::default()
            }])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let updated = pool.mark_elapsed_past(sweep_now()).await.unwrap();
        assert_eq!(updated, 0);
    }
}
