//! Database operations for users.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::user::User;

/// Find or create a user by Google ID. Updates profile on each login.
pub async fn upsert_from_google(
    db: &DatabaseConnection,
    google_id: &str,
    email: &str,
    name: Option<&str>,
    picture_url: Option<&str>,
) -> AppResult<User> {
    // Try to find existing user
    let existing = crate::entity::user::Entity::find()
        .filter(crate::entity::user::Column::GoogleId.eq(google_id))
        .one(db)
        .await?;

    if let Some(m) = existing {
        // Refresh profile fields from the provider
        let mut active: crate::entity::user::ActiveModel = m.into();
        active.email = Set(email.to_string());
        active.name = Set(name.map(|s| s.to_string()));
        active.picture_url = Set(picture_url.map(|s| s.to_string()));
        let updated = active.update(db).await?;
        return Ok(model_to_user(updated));
    }

    // Create new user
    let id = Uuid::new_v4();
    let now = Utc::now();

    let model = crate::entity::user::ActiveModel {
        id: Set(id),
        google_id: Set(google_id.to_string()),
        email: Set(email.to_string()),
        name: Set(name.map(|s| s.to_string())),
        picture_url: Set(picture_url.map(|s| s.to_string())),
        created_at: Set(now),
    };

    crate::entity::user::Entity::insert(model).exec(db).await?;

    // Fetch back the inserted user
    let inserted = crate::entity::user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| {
            crate::error::AppError::Database("Failed to fetch newly inserted user".to_string())
        })?;

    Ok(model_to_user(inserted))
}

/// Find a user by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<User>> {
    let result = crate::entity::user::Entity::find_by_id(id).one(db).await?;

    Ok(result.map(model_to_user))
}

/// Fetch several users at once (organizer/participant annotation).
pub async fn find_by_ids(db: &DatabaseConnection, ids: &[Uuid]) -> AppResult<Vec<User>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let result = crate::entity::user::Entity::find()
        .filter(crate::entity::user::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?;

    Ok(result.into_iter().map(model_to_user).collect())
}

fn model_to_user(m: crate::entity::user::Model) -> User {
    User {
        id: m.id,
        google_id: m.google_id,
        email: m.email,
        name: m.name,
        picture_url: m.picture_url,
        created_at: m.created_at,
    }
}
