//! Migration: Create event_participants table.
//!
//! One participation record per (event, user) pair; cascades from both
//! referenced tables so no orphan participation can exist.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE event_participants (
                    id UUID PRIMARY KEY,
                    event_id UUID NOT NULL REFERENCES destinations(id) ON DELETE CASCADE,
                    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    participation_type VARCHAR(20) NOT NULL
                        CHECK (participation_type IN ('joined', 'interested')),

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    UNIQUE (event_id, user_id)
                );

                -- A user's participations
                CREATE INDEX idx_event_participants_user_id
                    ON event_participants(user_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS event_participants CASCADE;")
            .await?;

        Ok(())
    }
}
