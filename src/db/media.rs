use sea_orm::*;
use uuid::Uuid;

use crate::models::media::{self, MediaType};
use crate::models::projects;

/// Insert media for a project at the append position (current row
/// count). Returns `None` when the project does not exist, so callers
/// can clean up an already-stored file.
pub async fn insert_media(
    db: &DatabaseConnection,
    project_id: Uuid,
    media_type: MediaType,
    url: String,
    alt_text: Option<String>,
) -> Result<Option<media::Model>, DbErr> {
    if projects::Entity::find_by_id(project_id).one(db).await?.is_none() {
        return Ok(None);
    }

    let position = media::Entity::find()
        .filter(media::Column::ProjectId.eq(project_id))
        .count(db)
        .await?;

    let new_media = media::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        media_type: Set(media_type),
        url: Set(url),
        alt_text: Set(alt_text),
        display_order: Set(position as i32),
        created_at: Set(chrono::Utc::now()),
    };

    new_media.insert(db).await.map(Some)
}

/// Upsert keyed on (project, media type, display position). An existing
/// row keeps its ID but receives the new URL and alt text; its previous
/// URL comes back so the caller can delete the stored file. Returns
/// `None` when the project does not exist.
pub async fn replace_or_create_media(
    db: &DatabaseConnection,
    project_id: Uuid,
    media_type: MediaType,
    url: String,
    alt_text: Option<String>,
    display_order: i32,
) -> Result<Option<(media::Model, Option<String>)>, DbErr> {
    if projects::Entity::find_by_id(project_id).one(db).await?.is_none() {
        return Ok(None);
    }

    let existing = media::Entity::find()
        .filter(media::Column::ProjectId.eq(project_id))
        .filter(media::Column::MediaType.eq(media_type))
        .filter(media::Column::DisplayOrder.eq(display_order))
        .one(db)
        .await?;

    match existing {
        Some(row) => {
            let old_url = row.url.clone();
            let mut active: media::ActiveModel = row.into();
            active.url = Set(url);
            active.alt_text = Set(alt_text);

            let updated = active.update(db).await?;
            Ok(Some((updated, Some(old_url))))
        }
        None => {
            let new_media = media::ActiveModel {
                id: Set(Uuid::new_v4()),
                project_id: Set(project_id),
                media_type: Set(media_type),
                url: Set(url),
                alt_text: Set(alt_text),
                display_order: Set(display_order),
                created_at: Set(chrono::Utc::now()),
            };

            new_media.insert(db).await.map(|created| Some((created, None)))
        }
    }
}

/// Fetch a project's media ordered by display position.
pub async fn get_media_for_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<Vec<media::Model>, DbErr> {
    media::Entity::find()
        .filter(media::Column::ProjectId.eq(project_id))
        .order_by_asc(media::Column::DisplayOrder)
        .all(db)
        .await
}

/// Fetch a single media row by ID.
pub async fn get_media_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<media::Model>, DbErr> {
    media::Entity::find_by_id(id).one(db).await
}

/// Delete a media row. Removing the stored file is the caller's job.
pub async fn delete_media(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    media::Entity::delete_by_id(id).exec(db).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> projects::Model {
        projects::Model {
            id: Uuid::new_v4(),
            client_id: None,
            title: "Portfolio Site".to_string(),
            slug: "portfolio-site".to_string(),
            short_description: None,
            description: "A portfolio site".to_string(),
            case_study: None,
            tech_stack: None,
            project_url: None,
            date: None,
            is_published: true,
            is_featured: false,
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    fn sample_media(project_id: Uuid, url: &str, display_order: i32) -> media::Model {
        media::Model {
            id: Uuid::new_v4(),
            project_id,
            media_type: MediaType::Image,
            url: url.to_string(),
            alt_text: None,
            display_order,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_media_rejects_missing_project() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<projects::Model>::new()])
            .into_connection();

        let result = insert_media(
            &db,
            Uuid::new_v4(),
            MediaType::Image,
            "/static/uploads/a.png".to_string(),
            None,
        )
        .await
        .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn replace_media_returns_previous_url() {
        let project = sample_project();
        let old = sample_media(project.id, "/static/uploads/old.png", 0);
        let replaced = media::Model {
            url: "/static/uploads/new.png".to_string(),
            ..old.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![project.clone()]])
            .append_query_results([vec![old]])
            .append_query_results([vec![replaced]])
            .into_connection();

        let (row, old_url) = replace_or_create_media(
            &db,
            project.id,
            MediaType::Image,
            "/static/uploads/new.png".to_string(),
            None,
            0,
        )
        .await
        .unwrap()
        .expect("project exists");

        assert_eq!(row.url, "/static/uploads/new.png");
        assert_eq!(old_url.as_deref(), Some("/static/uploads/old.png"));
    }
}
