use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::metrics as metric_db;
use crate::models::metrics::{CreateMetric, UpdateMetric};

/// POST /api/v1/admin/projects/{id}/metrics — add a metric to a project
/// (requires authentication).
pub async fn create_metric(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<CreateMetric>,
) -> impl Responder {
    let project_id = path.into_inner();
    match metric_db::insert_metric(db.get_ref(), project_id, body.into_inner()).await {
        Ok(Some(metric)) => HttpResponse::Created().json(metric),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Project {project_id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create metric: {e}"),
        })),
    }
}

/// GET /api/v1/admin/projects/{id}/metrics — list a project's metrics
/// in display order (requires authentication).
pub async fn get_project_metrics(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let project_id = path.into_inner();
    match metric_db::get_metrics_for_project(db.get_ref(), project_id).await {
        Ok(metrics) => HttpResponse::Ok().json(metrics),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch metrics: {e}"),
        })),
    }
}

/// PUT /api/v1/admin/metrics/{id} — update a metric (requires authentication).
pub async fn update_metric(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateMetric>,
) -> impl Responder {
    let id = path.into_inner();
    match metric_db::update_metric(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update metric: {e}"),
            }))
        }
    }
}

/// DELETE /api/v1/admin/metrics/{id} — delete a metric (requires authentication).
pub async fn delete_metric(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match metric_db::delete_metric(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Metric {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Metric {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete metric: {e}"),
        })),
    }
}
