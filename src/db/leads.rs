use sea_orm::*;
use uuid::Uuid;

use crate::models::clients::{self, CreateClient};
use crate::models::leads::{self, CreateLead, LeadStatus};

/// Source label recorded when the caller does not supply one.
const DEFAULT_SOURCE: &str = "Contact Form";

/// Insert a new lead. Status always starts as `new`.
pub async fn insert_lead(
    db: &DatabaseConnection,
    input: CreateLead,
) -> Result<leads::Model, DbErr> {
    let new_lead = leads::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        email: Set(input.email),
        message: Set(input.message),
        source: Set(input.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string())),
        status: Set(LeadStatus::New),
        created_at: Set(chrono::Utc::now()),
    };

    new_lead.insert(db).await
}

/// Fetch leads, optionally filtered by status, newest first.
pub async fn get_all_leads(
    db: &DatabaseConnection,
    status: Option<LeadStatus>,
) -> Result<Vec<leads::Model>, DbErr> {
    let mut query = leads::Entity::find();
    if let Some(status) = status {
        query = query.filter(leads::Column::Status.eq(status));
    }

    query.order_by_desc(leads::Column::CreatedAt).all(db).await
}

/// Fetch a single lead by ID.
pub async fn get_lead_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<leads::Model>, DbErr> {
    leads::Entity::find_by_id(id).one(db).await
}

/// Set a lead's pipeline status.
pub async fn update_lead_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: LeadStatus,
) -> Result<leads::Model, DbErr> {
    let lead = leads::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Lead not found".to_string()))?;

    let mut active: leads::ActiveModel = lead.into();
    active.status = Set(status);

    active.update(db).await
}

/// Delete a lead by ID.
pub async fn delete_lead(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    leads::Entity::delete_by_id(id).exec(db).await
}

/// Notes for a client created out of a lead. Admin-supplied notes, when
/// present, come first.
pub fn conversion_notes(admin_notes: Option<&str>, lead_message: &str) -> String {
    let conversion_note = format!("Converted from lead. Original message: {lead_message}");
    match admin_notes {
        Some(notes) => format!("{notes}\n\n{conversion_note}"),
        None => conversion_note,
    }
}

/// Convert a lead into a client owned by the acting admin. Creates the
/// client and marks the lead converted in one transaction. Returns
/// `None` when the lead does not exist.
pub async fn convert_to_client(
    db: &DatabaseConnection,
    lead_id: Uuid,
    user_id: Uuid,
    mut input: CreateClient,
) -> Result<Option<clients::Model>, DbErr> {
    let txn = db.begin().await?;

    let Some(lead) = leads::Entity::find_by_id(lead_id).one(&txn).await? else {
        return Ok(None);
    };

    input.notes = Some(conversion_notes(
        input.notes.as_deref().filter(|n| !n.is_empty()),
        &lead.message,
    ));

    let client = super::clients::insert_client(&txn, input, user_id).await?;

    let mut active: leads::ActiveModel = lead.into();
    active.status = Set(LeadStatus::Converted);
    active.update(&txn).await?;

    txn.commit().await?;

    Ok(Some(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_notes_without_admin_notes() {
        let notes = conversion_notes(None, "need a site");
        assert_eq!(notes, "Converted from lead. Original message: need a site");
    }

    #[test]
    fn conversion_notes_prepends_admin_notes() {
        let notes = conversion_notes(Some("Met at conference"), "need a site");
        assert_eq!(
            notes,
            "Met at conference\n\nConverted from lead. Original message: need a site"
        );
    }

    #[tokio::test]
    async fn convert_missing_lead_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<leads::Model>::new()])
            .into_connection();

        let input = CreateClient {
            company_name: None,
            contact_name: "Jane Doe".to_string(),
            contact_email: "jane@example.com".to_string(),
            phone: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            tax_id: None,
            notes: None,
        };

        let result = convert_to_client(&db, Uuid::new_v4(), Uuid::new_v4(), input)
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn convert_creates_client_and_marks_lead() {
        let lead_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let lead = leads::Model {
            id: lead_id,
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            message: "need a site".to_string(),
            source: "Contact Form".to_string(),
            status: LeadStatus::New,
            created_at: now,
        };
        let converted = leads::Model {
            status: LeadStatus::Converted,
            ..lead.clone()
        };
        let client = clients::Model {
            id: Uuid::new_v4(),
            user_id,
            company_name: None,
            contact_name: "Jane Doe".to_string(),
            contact_email: "jane@example.com".to_string(),
            phone: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            tax_id: None,
            notes: Some("Converted from lead. Original message: need a site".to_string()),
            created_at: now,
            updated_at: None,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lead]])
            .append_query_results([vec![client.clone()]])
            .append_query_results([vec![converted]])
            .into_connection();

        let input = CreateClient {
            company_name: None,
            contact_name: "Jane Doe".to_string(),
            contact_email: "jane@example.com".to_string(),
            phone: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            tax_id: None,
            notes: None,
        };

        let result = convert_to_client(&db, lead_id, user_id, input)
            .await
            .unwrap()
            .expect("lead should convert");

        assert_eq!(result.id, client.id);
        assert_eq!(
            result.notes.as_deref(),
            Some("Converted from lead. Original message: need a site")
        );
    }
}
