use sea_orm::*;
use uuid::Uuid;

use crate::models::clients::{self, CreateClient, UpdateClient};

/// Insert a new client owned by `user_id`.
///
/// Generic over the connection so lead conversion can run it inside a
/// transaction.
pub async fn insert_client<C: ConnectionTrait>(
    conn: &C,
    input: CreateClient,
    user_id: Uuid,
) -> Result<clients::Model, DbErr> {
    let new_client = clients::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        company_name: Set(input.company_name),
        contact_name: Set(input.contact_name),
        contact_email: Set(input.contact_email),
        phone: Set(input.phone),
        address: Set(input.address),
        city: Set(input.city),
        state: Set(input.state),
        postal_code: Set(input.postal_code),
        country: Set(input.country),
        tax_id: Set(input.tax_id),
        notes: Set(input.notes),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_client.insert(conn).await
}

/// Fetch all clients owned by a user, newest first.
pub async fn get_all_clients(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<clients::Model>, DbErr> {
    clients::Entity::find()
        .filter(clients::Column::UserId.eq(user_id))
        .order_by_desc(clients::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single client, scoped to its owner.
pub async fn get_client_by_id(
    db: &DatabaseConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<clients::Model>, DbErr> {
    clients::Entity::find_by_id(id)
        .filter(clients::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Update the fields present in the payload, scoped to the owner.
pub async fn update_client(
    db: &DatabaseConnection,
    id: Uuid,
    user_id: Uuid,
    input: UpdateClient,
) -> Result<clients::Model, DbErr> {
    let client = clients::Entity::find_by_id(id)
        .filter(clients::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Client not found".to_string()))?;

    let mut active: clients::ActiveModel = client.into();

    if let Some(company_name) = input.company_name {
        active.company_name = Set(Some(company_name));
    }
    if let Some(contact_name) = input.contact_name {
        active.contact_name = Set(contact_name);
    }
    if let Some(contact_email) = input.contact_email {
        active.contact_email = Set(contact_email);
    }
    if let Some(phone) = input.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = input.address {
        active.address = Set(Some(address));
    }
    if let Some(city) = input.city {
        active.city = Set(Some(city));
    }
    if let Some(state) = input.state {
        active.state = Set(Some(state));
    }
    if let Some(postal_code) = input.postal_code {
        active.postal_code = Set(Some(postal_code));
    }
    if let Some(country) = input.country {
        active.country = Set(Some(country));
    }
    if let Some(tax_id) = input.tax_id {
        active.tax_id = Set(Some(tax_id));
    }
    if let Some(notes) = input.notes {
        active.notes = Set(Some(notes));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a client, scoped to the owner.
pub async fn delete_client(
    db: &DatabaseConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<DeleteResult, DbErr> {
    clients::Entity::delete_many()
        .filter(clients::Column::Id.eq(id))
        .filter(clients::Column::UserId.eq(user_id))
        .exec(db)
        .await
}
