use actix_web::{HttpResponse, Responder, web};
use email_address::EmailAddress;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::clients as client_db;
use crate::models::clients::{CreateClient, UpdateClient};

/// POST /api/v1/admin/clients — create a client (requires authentication).
pub async fn create_client(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateClient>,
) -> impl Responder {
    let input = body.into_inner();
    if !EmailAddress::is_valid(&input.contact_email) {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": "contact_email is not a valid email address",
        }));
    }

    match client_db::insert_client(db.get_ref(), input, user.0.id).await {
        Ok(client) => HttpResponse::Created().json(client),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create client: {e}"),
        })),
    }
}

/// GET /api/v1/admin/clients — list the admin's clients (requires authentication).
pub async fn get_clients(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match client_db::get_all_clients(db.get_ref(), user.0.id).await {
        Ok(clients) => HttpResponse::Ok().json(clients),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch clients: {e}"),
        })),
    }
}

/// GET /api/v1/admin/clients/{id} — get a single client (requires authentication).
pub async fn get_client(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match client_db::get_client_by_id(db.get_ref(), id, user.0.id).await {
        Ok(Some(client)) => HttpResponse::Ok().json(client),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Client {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/v1/admin/clients/{id} — update a client (requires authentication).
pub async fn update_client(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateClient>,
) -> impl Responder {
    let id = path.into_inner();
    let input = body.into_inner();
    if let Some(contact_email) = &input.contact_email {
        if !EmailAddress::is_valid(contact_email) {
            return HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "error": "contact_email is not a valid email address",
            }));
        }
    }

    match client_db::update_client(db.get_ref(), id, user.0.id, input).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update client: {e}"),
            }))
        }
    }
}

/// DELETE /api/v1/admin/clients/{id} — delete a client (requires authentication).
pub async fn delete_client(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match client_db::delete_client(db.get_ref(), id, user.0.id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Client {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Client {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete client: {e}"),
        })),
    }
}
