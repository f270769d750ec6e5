use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::projects::{self, CreateProject, UpdateProject};

/// Turn a title into a URL slug: lowercase, drop everything outside
/// word characters, whitespace and hyphens, then collapse each
/// whitespace/hyphen run into a single hyphen.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_separator = false;

    for c in title.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            in_separator = true;
        } else if c.is_alphanumeric() || c == '_' {
            if in_separator {
                slug.push('-');
                in_separator = false;
            }
            slug.push(c);
        }
    }
    if in_separator {
        slug.push('-');
    }

    slug
}

/// Walk `-1`, `-2`, ... suffixes until the slug is free. On update the
/// project's own row does not count as a collision.
pub async fn ensure_unique_slug(
    db: &DatabaseConnection,
    base_slug: &str,
    exclude_id: Option<Uuid>,
) -> Result<String, DbErr> {
    let mut slug = base_slug.to_string();
    let mut counter = 1u32;

    loop {
        let mut query = projects::Entity::find().filter(projects::Column::Slug.eq(slug.as_str()));
        if let Some(own_id) = exclude_id {
            query = query.filter(projects::Column::Id.ne(own_id));
        }

        if query.one(db).await?.is_none() {
            return Ok(slug);
        }

        slug = format!("{base_slug}-{counter}");
        counter += 1;
    }
}

/// Insert a new project with a slug derived from its title.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: CreateProject,
) -> Result<projects::Model, DbErr> {
    let slug = ensure_unique_slug(db, &generate_slug(&input.title), None).await?;

    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(input.client_id),
        title: Set(input.title),
        slug: Set(slug),
        short_description: Set(input.short_description),
        description: Set(input.description),
        case_study: Set(input.case_study),
        tech_stack: Set(input.tech_stack.map(|stack| serde_json::json!(stack))),
        project_url: Set(input.project_url),
        date: Set(input.date),
        is_published: Set(input.is_published.unwrap_or(false)),
        is_featured: Set(input.is_featured.unwrap_or(false)),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_project.insert(db).await
}

/// Fetch projects ordered by effective date (explicit date, else the
/// date part of the creation timestamp), newest first.
pub async fn get_all_projects(
    db: &DatabaseConnection,
    published_only: bool,
    skip: u64,
    limit: u64,
) -> Result<Vec<projects::Model>, DbErr> {
    let mut query = projects::Entity::find();
    if published_only {
        query = query.filter(projects::Column::IsPublished.eq(true));
    }

    query
        .order_by_desc(Expr::cust(r#"COALESCE("date", DATE("created_at"))"#))
        .offset(skip)
        .limit(limit)
        .all(db)
        .await
}

/// Fetch published projects for the public site, optionally only the
/// featured ones.
pub async fn get_published_projects(
    db: &DatabaseConnection,
    featured_only: bool,
    limit: Option<u64>,
) -> Result<Vec<projects::Model>, DbErr> {
    let mut query = projects::Entity::find().filter(projects::Column::IsPublished.eq(true));
    if featured_only {
        query = query.filter(projects::Column::IsFeatured.eq(true));
    }

    query
        .order_by_desc(Expr::cust(r#"COALESCE("date", DATE("created_at"))"#))
        .limit(limit)
        .all(db)
        .await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// Fetch a single project by slug.
pub async fn get_project_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::Slug.eq(slug))
        .one(db)
        .await
}

/// Update the fields present in the payload. A changed title gets a
/// freshly deduplicated slug.
pub async fn update_project(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProject,
) -> Result<projects::Model, DbErr> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let mut active: projects::ActiveModel = project.clone().into();

    if let Some(title) = input.title {
        if title != project.title {
            let slug = ensure_unique_slug(db, &generate_slug(&title), Some(id)).await?;
            active.slug = Set(slug);
        }
        active.title = Set(title);
    }
    if let Some(client_id) = input.client_id {
        active.client_id = Set(Some(client_id));
    }
    if let Some(short_description) = input.short_description {
        active.short_description = Set(Some(short_description));
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(case_study) = input.case_study {
        active.case_study = Set(Some(case_study));
    }
    if let Some(stack) = input.tech_stack {
        active.tech_stack = Set(Some(serde_json::json!(stack)));
    }
    if let Some(project_url) = input.project_url {
        active.project_url = Set(Some(project_url));
    }
    if let Some(date) = input.date {
        active.date = Set(Some(date));
    }
    if let Some(is_published) = input.is_published {
        active.is_published = Set(is_published);
    }
    if let Some(is_featured) = input.is_featured {
        active.is_featured = Set(is_featured);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a project by ID. Media and metric rows cascade.
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_slug(slug: &str) -> projects::Model {
        projects::Model {
            id: Uuid::new_v4(),
            client_id: None,
            title: "Portfolio Site".to_string(),
            slug: slug.to_string(),
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

    #[tokio::test]
    async fn unique_slug_passes_through_when_free() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<projects::Model>::new()])
            .into_connection();

        let slug = ensure_unique_slug(&db, "portfolio-site", None).await.unwrap();
        assert_eq!(slug, "portfolio-site");
    }

    #[tokio::test]
    async fn unique_slug_appends_counter_on_collision() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![project_with_slug("portfolio-site")],
                vec![project_with_slug("portfolio-site-1")],
                vec![],
            ])
            .into_connection();

        let slug = ensure_unique_slug(&db, "portfolio-site", None).await.unwrap();
        assert_eq!(slug, "portfolio-site-2");
    }
}
