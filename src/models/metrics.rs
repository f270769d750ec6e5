use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `project_metrics` table. A metric is one
/// highlight figure shown on a case study ("40%", "Conversion uplift").
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_metrics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub icon_type: String,
    pub icon_value: String,
    pub metric_value: String,
    pub metric_label: String,
    pub display_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Project,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMetric {
    pub icon_type: String,
    pub icon_value: String,
    pub metric_value: String,
    pub metric_label: String,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMetric {
    pub icon_type: Option<String>,
    pub icon_value: Option<String>,
    pub metric_value: Option<String>,
    pub metric_label: Option<String>,
    pub display_order: Option<i32>,
}
