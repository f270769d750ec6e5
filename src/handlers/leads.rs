use actix_web::{HttpResponse, Responder, web};
use email_address::EmailAddress;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::leads as lead_db;
use crate::models::clients::CreateClient;
use crate::models::leads::{CreateLead, LeadListQuery, UpdateLeadStatus};

/// POST /api/v1/admin/leads — record a lead manually (requires authentication).
pub async fn create_lead(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateLead>,
) -> impl Responder {
    let input = body.into_inner();
    if !EmailAddress::is_valid(&input.email) {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": "email is not a valid email address",
        }));
    }

    match lead_db::insert_lead(db.get_ref(), input).await {
        Ok(lead) => HttpResponse::Created().json(lead),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create lead: {e}"),
        })),
    }
}

/// GET /api/v1/admin/leads — list leads, newest first (requires authentication).
pub async fn get_leads(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<LeadListQuery>,
) -> impl Responder {
    match lead_db::get_all_leads(db.get_ref(), query.into_inner().status).await {
        Ok(leads) => HttpResponse::Ok().json(leads),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch leads: {e}"),
        })),
    }
}

/// GET /api/v1/admin/leads/{id} — get a single lead (requires authentication).
pub async fn get_lead(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match lead_db::get_lead_by_id(db.get_ref(), id).await {
        Ok(Some(lead)) => HttpResponse::Ok().json(lead),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Lead {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/v1/admin/leads/{id} — move a lead through the pipeline
/// (requires authentication).
pub async fn update_lead(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateLeadStatus>,
) -> impl Responder {
    let id = path.into_inner();
    match lead_db::update_lead_status(db.get_ref(), id, body.into_inner().status).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update lead: {e}"),
            }))
        }
    }
}

/// DELETE /api/v1/admin/leads/{id} — delete a lead (requires authentication).
pub async fn delete_lead(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match lead_db::delete_lead(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Lead {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Lead {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete lead: {e}"),
        })),
    }
}

/// POST /api/v1/admin/leads/{id}/convert — turn a lead into a client
/// owned by the acting admin (requires authentication).
pub async fn convert_lead(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<CreateClient>,
) -> impl Responder {
    let id = path.into_inner();
    let input = body.into_inner();
    if !EmailAddress::is_valid(&input.contact_email) {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": "contact_email is not a valid email address",
        }));
    }

    match lead_db::convert_to_client(db.get_ref(), id, user.0.id, input).await {
        Ok(Some(client)) => HttpResponse::Created().json(client),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Lead {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to convert lead: {e}"),
        })),
    }
}
