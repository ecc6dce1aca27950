//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260715_000001_create_users;
mod m20260715_000002_create_places;
mod m20260715_000003_create_destinations;
mod m20260715_000004_create_event_participants;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260715_000001_create_users::Migration),
            Box::new(m20260715_000002_create_places::Migration),
            Box::new(m20260715_000003_create_destinations::Migration),
            Box::new(m20260715_000004_create_event_participants::Migration),
        ]
    }
}
