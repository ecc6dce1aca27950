//! Migration: Create places table.
//!
//! Opportunistic cache of places referenced from the maps widget.

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
                CREATE TABLE places (
                    id UUID PRIMARY KEY,
                    name VARCHAR(255) NOT NULL,
                    address VARCHAR(500),
                    latitude DOUBLE PRECISION NOT NULL,
                    longitude DOUBLE PRECISION NOT NULL,
                    rating DOUBLE PRECISION,
                    google_place_id VARCHAR(128),

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- External place identifier is unique when present
                CREATE UNIQUE INDEX idx_places_google_place_id
                    ON places(google_place_id)
                    WHERE google_place_id IS NOT NULL;
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS places CASCADE;")
            .await?;

        Ok(())
    }
}
