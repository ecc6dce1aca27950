//! Migration: Create destinations table.
//!
//! Destination events created by an organizer at a place. Status is
//! constrained to the three lifecycle values; deleting the organizer
//! cascades to their events.

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
                CREATE TABLE destinations (
                    id UUID PRIMARY KEY,
                    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    place_name VARCHAR(255) NOT NULL,
                    address VARCHAR(500),
                    latitude DOUBLE PRECISION NOT NULL,
                    longitude DOUBLE PRECISION NOT NULL,
                    google_place_id VARCHAR(128),
                    place_type VARCHAR(100),
                    rating DOUBLE PRECISION,
                    scheduled_date DATE NOT NULL,
                    scheduled_time TIME,
                    status VARCHAR(20) NOT NULL DEFAULT 'active'
                        CHECK (status IN ('active', 'past', 'cancelled')),

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Organizer's event list
                CREATE INDEX idx_destinations_user_id ON destinations(user_id);

                -- The sweep scans active rows by schedule
                CREATE INDEX idx_destinations_status_schedule
                    ON destinations(status, scheduled_date, scheduled_time);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS destinations CASCADE;")
            .await?;

        Ok(())
    }
}
