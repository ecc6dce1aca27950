//! Database queries for event participation.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::event_participant::{self, ActiveModel, Entity as Participant};
use crate::error::{AppError, AppResult};
use crate::models::ParticipationKind;

use super::DbPool;

impl DbPool {
    /// Find the participation record for an (event, user) pair.
    pub async fn find_participation(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<event_participant::Model>> {
        let result = Participant::find()
            .filter(event_participant::Column::EventId.eq(event_id))
            .filter(event_participant::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to look up participation: {}", e)))?;

        Ok(result)
    }

    /// Join or mark interest in an event. At most one record exists per
    /// (event, user) pair: a second submission updates the kind in place.
    /// The unique constraint backs this against races.
    pub async fn upsert_participation(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        kind: ParticipationKind,
    ) -> AppResult<event_participant::Model> {
        if let Some(m) = self.find_participation(event_id, user_id).await? {
            let mut active: ActiveModel = m.into();
            active.participation_type = Set(kind.as_str().to_string());

            let result = active
                .update(self.connection())
                .await
                .map_err(|e| AppError::Database(format!("Failed to update participation: {}", e)))?;

            return Ok(result);
        }

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            event_id: Set(event_id),
            user_id: Set(user_id),
            participation_type: Set(kind.as_str().to_string()),
            created_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert participation: {}", e)))?;

        Ok(result)
    }

    /// Withdraw a user's participation. Returns false when there was none.
    pub async fn delete_participation(&self, event_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = Participant::delete_many()
            .filter(event_participant::Column::EventId.eq(event_id))
            .filter(event_participant::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete participation: {}", e)))?;

        Ok(result.rows_affected > 0)
    }

    /// All participation records for an event.
    pub async fn participants_for_event(
        &self,
        event_id: Uuid,
    ) -> AppResult<Vec<event_participant::Model>> {
        let result = Participant::find()
            .filter(event_participant::Column::EventId.eq(event_id))
            .order_by_asc(event_participant::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list participants: {}", e)))?;

        Ok(result)
    }

    /// All participation records for a user.
    pub async fn participations_for_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<event_participant::Model>> {
        let result = Participant::find()
            .filter(event_participant::Column::UserId.eq(user_id))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list participations: {}", e)))?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn participation(kind: ParticipationKind) -> event_participant::Model {
        event_participant::Model {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            participation_type: kind.as_str().to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_second_submission_updates_kind_instead_of_inserting() {
        let existing = participation(ParticipationKind::Joined);
        let mut updated = existing.clone();
        updated.participation_type = ParticipationKind::Interested.as_str().to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // lookup finds the existing (event, user) record
            .append_query_results([vec![existing.clone()]])
            // the update returns the modified row
            .append_query_results([vec![updated]])
            .append_exec_results([MockExecResult {
                rows_affected: 1,
                ..Default::default()
            }])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let result = pool
            .upsert_participation(
                existing.event_id,
                existing.user_id,
                ParticipationKind::Interested,
            )
            .await
            .unwrap();

        assert_eq!(result.id, existing.id);
        assert_eq!(
            result.participation_type,
            ParticipationKind::Interested.as_str()
        );

        let sql = format!("{:?}", pool.conn.into_transaction_log());
        assert!(sql.contains("UPDATE"));
        assert!(!sql.contains("INSERT"), "existing pair must never duplicate");
    }

    #[tokio::test]
    async fn test_withdraw_without_participation_reports_false() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 0,
                ..Default::default()
            }])
            .into_connection();
        let pool = DbPool::from_connection(db);

        let removed = pool
            .delete_participation(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();

        assert!(!removed);
    }
}
