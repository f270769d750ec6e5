use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, Responder, web};
use futures_util::StreamExt as _;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::media as media_db;
use crate::models::media::{MediaType, UploadMeta};
use crate::storage::{MediaStorage, max_bytes_for, media_type_for, unique_object_name};

/// Drain a text part into a string. Unreadable or non-UTF-8 parts come
/// back as `None`.
async fn read_text(field: &mut Field) -> Option<String> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        match chunk {
            Ok(bytes) => data.extend_from_slice(&bytes),
            Err(_) => return None,
        }
    }
    String::from_utf8(data).ok()
}

/// One parsed upload: the validated file part and its companion fields.
struct Upload {
    filename: String,
    media_type: MediaType,
    data: Vec<u8>,
    meta: UploadMeta,
}

/// Pull the upload out of the multipart stream, enforcing the extension
/// allow-list and the per-type size cap while the file is buffered.
async fn read_upload(payload: &mut Multipart) -> Result<Upload, HttpResponse> {
    let mut file: Option<(String, MediaType, Vec<u8>)> = None;
    let mut meta = UploadMeta::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Malformed multipart payload: {e}"),
            }))
        })?;

        let name = field.name().to_string();
        match name.as_str() {
            "file" => {
                let Some(filename) = field
                    .content_disposition()
                    .get_filename()
                    .map(str::to_string)
                else {
                    return Err(HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "file part is missing a filename",
                    })));
                };

                let Some(media_type) = media_type_for(&filename) else {
                    return Err(HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "File type not allowed",
                    })));
                };
                let cap = max_bytes_for(media_type);

                let mut data = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| {
                        HttpResponse::BadRequest().json(serde_json::json!({
                            "error": format!("Failed to read upload: {e}"),
                        }))
                    })?;
                    if data.len() + chunk.len() > cap {
                        return Err(HttpResponse::BadRequest().json(serde_json::json!({
                            "error": format!(
                                "File exceeds the {} MB limit",
                                cap / (1024 * 1024)
                            ),
                        })));
                    }
                    data.extend_from_slice(&chunk);
                }

                file = Some((filename, media_type, data));
            }
            "alt_text" => {
                meta.alt_text = read_text(&mut field).await.filter(|s| !s.is_empty());
            }
            "display_order" => {
                let raw = read_text(&mut field).await.unwrap_or_default();
                if raw.is_empty() {
                    meta.display_order = None;
                } else {
                    match raw.trim().parse::<i32>() {
                        Ok(position) => meta.display_order = Some(position),
                        Err(_) => {
                            return Err(HttpResponse::UnprocessableEntity().json(
                                serde_json::json!({
                                    "error": "display_order must be an integer",
                                }),
                            ));
                        }
                    }
                }
            }
            _ => {
                // Unknown parts still have to be drained before the
                // next field becomes available.
                while let Some(_chunk) = field.next().await {}
            }
        }
    }

    let Some((filename, media_type, data)) = file else {
        return Err(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "No file part in upload",
        })));
    };

    Ok(Upload {
        filename,
        media_type,
        data,
        meta,
    })
}

/// POST /api/v1/admin/projects/{id}/media — upload a media file and
/// attach it to the project (requires authentication). An explicit
/// display_order replaces the media already at that position.
pub async fn upload_media(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    storage: web::Data<dyn MediaStorage>,
    path: web::Path<Uuid>,
    mut payload: Multipart,
) -> impl Responder {
    let project_id = path.into_inner();

    let upload = match read_upload(&mut payload).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    let stored_name = unique_object_name(&upload.filename);
    let url = match storage.store(&stored_name, &upload.data).await {
        Ok(url) => url,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to store file: {e}"),
            }));
        }
    };

    let result = match upload.meta.display_order {
        Some(position) => {
            media_db::replace_or_create_media(
                db.get_ref(),
                project_id,
                upload.media_type,
                url.clone(),
                upload.meta.alt_text,
                position,
            )
            .await
        }
        None => media_db::insert_media(
            db.get_ref(),
            project_id,
            upload.media_type,
            url.clone(),
            upload.meta.alt_text,
        )
        .await
        .map(|outcome| outcome.map(|row| (row, None))),
    };

    match result {
        Ok(Some((row, old_url))) => {
            if let Some(old_url) = old_url {
                if let Err(e) = storage.delete(&old_url).await {
                    tracing::warn!("Failed to remove replaced file {old_url}: {e}");
                }
            }
            HttpResponse::Created().json(row)
        }
        Ok(None) => {
            // The project vanished under us; do not leave the stored
            // file orphaned.
            if let Err(e) = storage.delete(&url).await {
                tracing::warn!("Failed to remove orphaned file {url}: {e}");
            }
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {project_id} not found"),
            }))
        }
        Err(e) => {
            if let Err(cleanup) = storage.delete(&url).await {
                tracing::warn!("Failed to remove orphaned file {url}: {cleanup}");
            }
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to save media: {e}"),
            }))
        }
    }
}

/// GET /api/v1/admin/projects/{id}/media — list a project's media in
/// display order (requires authentication).
pub async fn get_project_media(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let project_id = path.into_inner();
    match media_db::get_media_for_project(db.get_ref(), project_id).await {
        Ok(media) => HttpResponse::Ok().json(media),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch media: {e}"),
        })),
    }
}

/// DELETE /api/v1/admin/media/{id} — delete a media row and its stored
/// file (requires authentication). The database row is authoritative;
/// a failed file removal only logs.
pub async fn delete_media(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    storage: web::Data<dyn MediaStorage>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let media = match media_db::get_media_by_id(db.get_ref(), id).await {
        Ok(Some(media)) => media,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Media {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if let Err(e) = storage.delete(&media.url).await {
        tracing::warn!("Failed to remove stored file {}: {e}", media.url);
    }

    match media_db::delete_media(db.get_ref(), id).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Media {id} deleted"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete media: {e}"),
        })),
    }
}
