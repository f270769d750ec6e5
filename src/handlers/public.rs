use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::db::projects as project_db;
use crate::models::projects::PublicProjectQuery;

/// GET /health — liveness probe.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/v1/projects — published projects for the public site, with
/// optional featured filter and limit.
pub async fn get_projects(
    db: web::Data<DatabaseConnection>,
    query: web::Query<PublicProjectQuery>,
) -> impl Responder {
    let query = query.into_inner();
    match project_db::get_published_projects(
        db.get_ref(),
        query.featured.unwrap_or(false),
        query.limit,
    )
    .await
    {
        Ok(projects) => HttpResponse::Ok().json(projects),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch projects: {e}"),
        })),
    }
}

/// GET /api/v1/projects/{slug} — one published project with media and
/// metrics. Unpublished projects are indistinguishable from missing.
pub async fn get_project_by_slug(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> impl Responder {
    let slug = path.into_inner();
    let project = match project_db::get_project_by_slug(db.get_ref(), &slug).await {
        Ok(Some(project)) if project.is_published => project,
        Ok(_) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {slug} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match super::projects::load_detail(db.get_ref(), project).await {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
