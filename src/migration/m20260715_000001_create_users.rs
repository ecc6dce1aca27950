//! Migration: Create users table.
//!
//! Stores Google OAuth users. Rows are created on first login.

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
                CREATE TABLE users (
                    id UUID PRIMARY KEY,
                    google_id VARCHAR(64) NOT NULL,
                    email VARCHAR(255) NOT NULL,
                    name VARCHAR(255),
                    picture_url VARCHAR(500),

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- OAuth provider identity is unique per user
                CREATE UNIQUE INDEX idx_users_google_id ON users(google_id);

                -- Index for email lookup
                CREATE INDEX idx_users_email ON users(email);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS users CASCADE;")
            .await?;

        Ok(())
    }
}
