use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::{media as media_db, metrics as metric_db, projects as project_db};
use crate::models::projects::{self, CreateProject, ProjectDetail, ProjectListQuery, UpdateProject};
use crate::storage::MediaStorage;

/// Attach a project's ordered media and metrics for detail responses.
pub(crate) async fn load_detail(
    db: &DatabaseConnection,
    project: projects::Model,
) -> Result<ProjectDetail, DbErr> {
    let media = media_db::get_media_for_project(db, project.id).await?;
    let metrics = metric_db::get_metrics_for_project(db, project.id).await?;

    Ok(ProjectDetail {
        project,
        media,
        metrics,
    })
}

/// POST /api/v1/admin/projects — create a project (requires authentication).
pub async fn create_project(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProject>,
) -> impl Responder {
    match project_db::insert_project(db.get_ref(), body.into_inner()).await {
        Ok(project) => HttpResponse::Created().json(project),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create project: {e}"),
        })),
    }
}

/// GET /api/v1/admin/projects — list projects by effective date
/// (requires authentication).
pub async fn get_projects(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProjectListQuery>,
) -> impl Responder {
    let query = query.into_inner();
    match project_db::get_all_projects(
        db.get_ref(),
        query.published.unwrap_or(false),
        query.skip(),
        query.limit(),
    )
    .await
    {
        Ok(projects) => HttpResponse::Ok().json(projects),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch projects: {e}"),
        })),
    }
}

/// GET /api/v1/admin/projects/{id} — project with media and metrics
/// (requires authentication).
pub async fn get_project(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let project = match project_db::get_project_by_id(db.get_ref(), id).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match load_detail(db.get_ref(), project).await {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/v1/admin/projects/{id} — update a project (requires authentication).
pub async fn update_project(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProject>,
) -> impl Responder {
    let id = path.into_inner();
    match project_db::update_project(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update project: {e}"),
            }))
        }
    }
}

/// DELETE /api/v1/admin/projects/{id} — delete a project along with its
/// stored media files (requires authentication).
pub async fn delete_project(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    storage: web::Data<dyn MediaStorage>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    // Collect the media URLs first; the rows are gone once the project
    // cascade runs.
    let media = match media_db::get_media_for_project(db.get_ref(), id).await {
        Ok(media) => media,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match project_db::delete_project(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                for item in &media {
                    if let Err(e) = storage.delete(&item.url).await {
                        tracing::warn!("Failed to remove stored file {}: {e}", item.url);
                    }
                }
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Project {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Project {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete project: {e}"),
        })),
    }
}
