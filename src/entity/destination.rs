//! Destination (event) entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "destinations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Organizer.
    pub user_id: Uuid,
    pub place_name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub google_place_id: Option<String>,
    pub place_type: Option<String>,
    pub rating: Option<f64>,
    pub scheduled_date: Date,
    /// NULL means an all-day event.
    pub scheduled_time: Option<Time>,
    /// One of: active, past, cancelled.
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Organizer,
    #[sea_orm(has_many = "super::event_participant::Entity")]
    Participants,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizer.def()
    }
}

impl Related<super::event_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
