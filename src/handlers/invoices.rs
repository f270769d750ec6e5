use actix_web::{HttpResponse, Responder, web};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::invoices as invoice_db;
use crate::models::invoice_items::CreateInvoiceItem;
use crate::models::invoices::{CreateInvoice, InvoiceDetail, InvoiceListQuery, UpdateInvoice};

/// Range checks on line items; richer invariants live in the database.
fn validate_items(items: &[CreateInvoiceItem]) -> Option<HttpResponse> {
    for item in items {
        if item.quantity <= Decimal::ZERO {
            return Some(HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "error": "quantity must be greater than zero",
            })));
        }
        if item.unit_price < Decimal::ZERO {
            return Some(HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "error": "unit_price must not be negative",
            })));
        }
    }
    None
}

/// POST /api/v1/admin/invoices — create an invoice with its line items
/// (requires authentication).
pub async fn create_invoice(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateInvoice>,
) -> impl Responder {
    let input = body.into_inner();
    if let Some(rejection) = validate_items(&input.items) {
        return rejection;
    }

    match invoice_db::insert_invoice(db.get_ref(), input, user.0.id).await {
        Ok((invoice, items)) => HttpResponse::Created().json(InvoiceDetail::new(invoice, items)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create invoice: {e}"),
        })),
    }
}

/// GET /api/v1/admin/invoices — list the admin's invoices, newest first
/// (requires authentication).
pub async fn get_invoices(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<InvoiceListQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let invoices = match invoice_db::get_all_invoices(
        db.get_ref(),
        user.0.id,
        query.status,
        query.client_id,
    )
    .await
    {
        Ok(invoices) => invoices,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to fetch invoices: {e}"),
            }));
        }
    };

    let mut details = Vec::with_capacity(invoices.len());
    for invoice in invoices {
        match invoice_db::get_invoice_items(db.get_ref(), invoice.id).await {
            Ok(items) => details.push(InvoiceDetail::new(invoice, items)),
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to fetch invoice items: {e}"),
                }));
            }
        }
    }

    HttpResponse::Ok().json(details)
}

/// GET /api/v1/admin/invoices/{id} — invoice with line items (requires
/// authentication).
pub async fn get_invoice(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let invoice = match invoice_db::get_invoice_by_id(db.get_ref(), id, user.0.id).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Invoice {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match invoice_db::get_invoice_items(db.get_ref(), id).await {
        Ok(items) => HttpResponse::Ok().json(InvoiceDetail::new(invoice, items)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch invoice items: {e}"),
        })),
    }
}

/// PUT /api/v1/admin/invoices/{id} — update header fields; totals stay
/// as created (requires authentication).
pub async fn update_invoice(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateInvoice>,
) -> impl Responder {
    let id = path.into_inner();
    let updated = match invoice_db::update_invoice(db.get_ref(), id, user.0.id, body.into_inner())
        .await
    {
        Ok(updated) => updated,
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            return status.json(serde_json::json!({
                "error": format!("Failed to update invoice: {e}"),
            }));
        }
    };

    match invoice_db::get_invoice_items(db.get_ref(), id).await {
        Ok(items) => HttpResponse::Ok().json(InvoiceDetail::new(updated, items)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch invoice items: {e}"),
        })),
    }
}

/// POST /api/v1/admin/invoices/{id}/mark-paid — mark an invoice paid
/// and stamp the payment date (requires authentication).
pub async fn mark_paid(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let updated = match invoice_db::mark_invoice_paid(db.get_ref(), id, user.0.id).await {
        Ok(updated) => updated,
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            return status.json(serde_json::json!({
                "error": format!("Failed to mark invoice paid: {e}"),
            }));
        }
    };

    match invoice_db::get_invoice_items(db.get_ref(), id).await {
        Ok(items) => HttpResponse::Ok().json(InvoiceDetail::new(updated, items)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch invoice items: {e}"),
        })),
    }
}

/// DELETE /api/v1/admin/invoices/{id} — delete an invoice and its items
/// (requires authentication).
pub async fn delete_invoice(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match invoice_db::delete_invoice(db.get_ref(), id, user.0.id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Invoice {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Invoice {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete invoice: {e}"),
        })),
    }
}
