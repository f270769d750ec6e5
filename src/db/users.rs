use sea_orm::*;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::models::users::{self, CreateUser};

/// Fetch a user by email address.
pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

/// Insert a new admin user.
pub async fn insert_user(
    db: &DatabaseConnection,
    input: CreateUser,
) -> Result<users::Model, DbErr> {
    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(input.email),
        password_hash: Set(input.password_hash),
        full_name: Set(input.full_name),
        company_name: Set(input.company_name),
        role: Set("admin".to_string()),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_user.insert(db).await
}

/// Create the bootstrap admin account on first startup. Skipped when
/// any user already exists.
pub async fn ensure_admin_user(
    db: &DatabaseConnection,
    bootstrap: &AdminBootstrap,
) -> Result<Option<users::Model>, DbErr> {
    let existing = users::Entity::find().count(db).await?;
    if existing > 0 {
        return Ok(None);
    }

    let password_hash = hash_password(&bootstrap.password)
        .map_err(|e| DbErr::Custom(format!("Failed to hash admin password: {e}")))?;

    let user = insert_user(
        db,
        CreateUser {
            email: bootstrap.email.clone(),
            password_hash,
            full_name: bootstrap.full_name.clone(),
            company_name: None,
        },
    )
    .await?;

    Ok(Some(user))
}
