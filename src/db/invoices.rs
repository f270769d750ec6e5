use chrono::Datelike;
use rust_decimal::Decimal;
use sea_orm::*;
use uuid::Uuid;

use crate::models::invoice_items::{self, CreateInvoiceItem};
use crate::models::invoices::{self, CreateInvoice, InvoiceStatus, UpdateInvoice};

/// Prefix for generated invoice numbers.
const INVOICE_PREFIX: &str = "INV";

/// Format one invoice number, e.g. `INV-2025-0007`.
pub fn format_invoice_number(prefix: &str, year: i32, number: u64) -> String {
    format!("{prefix}-{year}-{number:04}")
}

/// Totals over the line items: subtotal, tax amount for `tax_rate`
/// percent, and grand total, all rounded to cents.
pub fn calculate_totals(
    items: &[CreateInvoiceItem],
    tax_rate: Decimal,
) -> (Decimal, Decimal, Decimal) {
    let subtotal: Decimal = items
        .iter()
        .map(|item| item.quantity * item.unit_price)
        .sum();
    let subtotal = subtotal.round_dp(2);
    let tax_amount = (subtotal * tax_rate / Decimal::from(100)).round_dp(2);
    let total = subtotal + tax_amount;

    (subtotal, tax_amount, total)
}

/// Next invoice number for a user: sequence position from the user's
/// invoice count, bumped past any number already taken (deleted rows
/// leave gaps that make the count lag behind issued numbers).
pub async fn generate_invoice_number<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> Result<String, DbErr> {
    let count = invoices::Entity::find()
        .filter(invoices::Column::UserId.eq(user_id))
        .count(conn)
        .await?;

    let year = chrono::Utc::now().year();
    let mut number = count + 1;

    loop {
        let candidate = format_invoice_number(INVOICE_PREFIX, year, number);
        let taken = invoices::Entity::find()
            .filter(invoices::Column::InvoiceNumber.eq(candidate.as_str()))
            .one(conn)
            .await?
            .is_some();

        if !taken {
            return Ok(candidate);
        }
        number += 1;
    }
}

/// Create an invoice with its line items in one transaction. Totals
/// are computed here and stored as a snapshot.
pub async fn insert_invoice(
    db: &DatabaseConnection,
    input: CreateInvoice,
    user_id: Uuid,
) -> Result<(invoices::Model, Vec<invoice_items::Model>), DbErr> {
    let txn = db.begin().await?;

    let invoice_number = generate_invoice_number(&txn, user_id).await?;
    let tax_rate = input.tax_rate.unwrap_or_default();
    let (subtotal, tax_amount, total) = calculate_totals(&input.items, tax_rate);

    let new_invoice = invoices::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        client_id: Set(input.client_id),
        project_id: Set(input.project_id),
        invoice_number: Set(invoice_number),
        status: Set(InvoiceStatus::Draft),
        currency: Set(input.currency.unwrap_or_else(|| "USD".to_string())),
        issue_date: Set(input.issue_date.unwrap_or_else(chrono::Utc::now)),
        due_date: Set(input.due_date),
        paid_date: Set(None),
        notes: Set(input.notes),
        terms: Set(input.terms),
        subtotal: Set(subtotal),
        tax_rate: Set(tax_rate),
        tax_amount: Set(tax_amount),
        total: Set(total),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    let invoice = new_invoice.insert(&txn).await?;

    let mut items = Vec::with_capacity(input.items.len());
    for item in input.items {
        let new_item = invoice_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            invoice_id: Set(invoice.id),
            description: Set(item.description),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
        };
        items.push(new_item.insert(&txn).await?);
    }

    txn.commit().await?;

    Ok((invoice, items))
}

/// Fetch invoices owned by a user, optionally filtered by status and
/// client, newest first.
pub async fn get_all_invoices(
    db: &DatabaseConnection,
    user_id: Uuid,
    status: Option<InvoiceStatus>,
    client_id: Option<Uuid>,
) -> Result<Vec<invoices::Model>, DbErr> {
    let mut query = invoices::Entity::find().filter(invoices::Column::UserId.eq(user_id));
    if let Some(status) = status {
        query = query.filter(invoices::Column::Status.eq(status));
    }
    if let Some(client_id) = client_id {
        query = query.filter(invoices::Column::ClientId.eq(client_id));
    }

    query
        .order_by_desc(invoices::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single invoice, scoped to its owner.
pub async fn get_invoice_by_id(
    db: &DatabaseConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<invoices::Model>, DbErr> {
    invoices::Entity::find_by_id(id)
        .filter(invoices::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Fetch an invoice's line items.
pub async fn get_invoice_items(
    db: &DatabaseConnection,
    invoice_id: Uuid,
) -> Result<Vec<invoice_items::Model>, DbErr> {
    invoice_items::Entity::find()
        .filter(invoice_items::Column::InvoiceId.eq(invoice_id))
        .all(db)
        .await
}

/// Update header fields present in the payload, scoped to the owner.
/// Line items and totals are immutable after creation.
pub async fn update_invoice(
    db: &DatabaseConnection,
    id: Uuid,
    user_id: Uuid,
    input: UpdateInvoice,
) -> Result<invoices::Model, DbErr> {
    let invoice = invoices::Entity::find_by_id(id)
        .filter(invoices::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Invoice not found".to_string()))?;

    let mut active: invoices::ActiveModel = invoice.into();

    if let Some(project_id) = input.project_id {
        active.project_id = Set(Some(project_id));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    if let Some(currency) = input.currency {
        active.currency = Set(currency);
    }
    if let Some(issue_date) = input.issue_date {
        active.issue_date = Set(issue_date);
    }
    if let Some(due_date) = input.due_date {
        active.due_date = Set(Some(due_date));
    }
    if let Some(notes) = input.notes {
        active.notes = Set(Some(notes));
    }
    if let Some(terms) = input.terms {
        active.terms = Set(Some(terms));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Mark an invoice paid and stamp the payment date. Allowed from any
/// status.
pub async fn mark_invoice_paid(
    db: &DatabaseConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<invoices::Model, DbErr> {
    let invoice = invoices::Entity::find_by_id(id)
        .filter(invoices::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Invoice not found".to_string()))?;

    let mut active: invoices::ActiveModel = invoice.into();
    active.status = Set(InvoiceStatus::Paid);
    active.paid_date = Set(Some(chrono::Utc::now()));
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete an invoice, scoped to the owner. Line items cascade.
pub async fn delete_invoice(
    db: &DatabaseConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<DeleteResult, DbErr> {
    invoices::Entity::delete_many()
        .filter(invoices::Column::Id.eq(id))
        .filter(invoices::Column::UserId.eq(user_id))
        .exec(db)
        .await
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn invoice_numbered(user_id: Uuid, invoice_number: &str) -> invoices::Model {
        invoices::Model {
            id: Uuid::new_v4(),
            user_id,
            client_id: Uuid::new_v4(),
            project_id: None,
            invoice_number: invoice_number.to_string(),
            status: InvoiceStatus::Draft,
            currency: "USD".to_string(),
            issue_date: chrono::Utc::now(),
            due_date: None,
            paid_date: None,
            notes: None,
            terms: None,
            subtotal: Decimal::new(2500, 2),
            tax_rate: Decimal::new(1000, 2),
            tax_amount: Decimal::new(250, 2),
            total: Decimal::new(2750, 2),
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn invoice_number_skips_taken_numbers() {
        let user_id = Uuid::new_v4();
        let year = chrono::Utc::now().year();
        let count_row = BTreeMap::from([("num_items", Into::<Value>::into(3i64))]);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row]])
            .append_query_results([vec![invoice_numbered(
                user_id,
                &format!("INV-{year}-0004"),
            )]])
            .append_query_results([Vec::<invoices::Model>::new()])
            .into_connection();

        let number = generate_invoice_number(&db, user_id).await.unwrap();
        assert_eq!(number, format!("INV-{year}-0005"));
    }

    #[tokio::test]
    async fn invoice_number_uses_count_plus_one_when_free() {
        let user_id = Uuid::new_v4();
        let year = chrono::Utc::now().year();
        let count_row = BTreeMap::from([("num_items", Into::<Value>::into(0i64))]);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row]])
            .append_query_results([Vec::<invoices::Model>::new()])
            .into_connection();

        let number = generate_invoice_number(&db, user_id).await.unwrap();
        assert_eq!(number, format!("INV-{year}-0001"));
    }
}
