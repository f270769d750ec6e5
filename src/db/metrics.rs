use sea_orm::*;
use uuid::Uuid;

use crate::models::metrics::{self, CreateMetric, UpdateMetric};
use crate::models::projects;

/// Insert a metric for a project. A missing display position appends
/// after the project's existing metrics. Returns `None` when the
/// project does not exist.
pub async fn insert_metric(
    db: &DatabaseConnection,
    project_id: Uuid,
    input: CreateMetric,
) -> Result<Option<metrics::Model>, DbErr> {
    if projects::Entity::find_by_id(project_id).one(db).await?.is_none() {
        return Ok(None);
    }

    let position = match input.display_order {
        Some(position) => position,
        None => {
            metrics::Entity::find()
                .filter(metrics::Column::ProjectId.eq(project_id))
                .count(db)
                .await? as i32
        }
    };

    let new_metric = metrics::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        icon_type: Set(input.icon_type),
        icon_value: Set(input.icon_value),
        metric_value: Set(input.metric_value),
        metric_label: Set(input.metric_label),
        display_order: Set(position),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_metric.insert(db).await.map(Some)
}

/// Fetch a project's metrics ordered by display position.
pub async fn get_metrics_for_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<Vec<metrics::Model>, DbErr> {
    metrics::Entity::find()
        .filter(metrics::Column::ProjectId.eq(project_id))
        .order_by_asc(metrics::Column::DisplayOrder)
        .all(db)
        .await
}

/// Fetch a single metric by ID.
pub async fn get_metric_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<metrics::Model>, DbErr> {
    metrics::Entity::find_by_id(id).one(db).await
}

/// Update the fields present in the payload.
pub async fn update_metric(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateMetric,
) -> Result<metrics::Model, DbErr> {
    let metric = metrics::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Metric not found".to_string()))?;

    let mut active: metrics::ActiveModel = metric.into();

    if let Some(icon_type) = input.icon_type {
        active.icon_type = Set(icon_type);
    }
    if let Some(icon_value) = input.icon_value {
        active.icon_value = Set(icon_value);
    }
    if let Some(metric_value) = input.metric_value {
        active.metric_value = Set(metric_value);
    }
    if let Some(metric_label) = input.metric_label {
        active.metric_label = Set(metric_label);
    }
    if let Some(display_order) = input.display_order {
        active.display_order = Set(display_order);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a metric by ID.
pub async fn delete_metric(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    metrics::Entity::delete_by_id(id).exec(db).await
}
