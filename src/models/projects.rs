use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `projects` table (one row per portfolio entry).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub short_description: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub case_study: Option<String>,
    pub tech_stack: Option<Json>,
    pub project_url: Option<String>,
    pub date: Option<Date>,
    pub is_published: bool,
    pub is_featured: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Client,
    #[sea_orm(has_many = "super::media::Entity")]
    Media,
    #[sea_orm(has_many = "super::metrics::Entity")]
    Metrics,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Media.def()
    }
}

impl Related<super::metrics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Metrics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub client_id: Option<Uuid>,
    pub title: String,
    pub short_description: Option<String>,
    pub description: String,
    pub case_study: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub project_url: Option<String>,
    pub date: Option<Date>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub client_id: Option<Uuid>,
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub case_study: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub project_url: Option<String>,
    pub date: Option<Date>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub published: Option<bool>,
}

impl ProjectListQuery {
    pub fn skip(&self) -> u64 {
        self.skip.unwrap_or(0)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(100).min(100)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicProjectQuery {
    pub featured: Option<bool>,
    pub limit: Option<u64>,
}

/// A project with its ordered media and metrics, used by detail reads.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Model,
    pub media: Vec<super::media::Model>,
    pub metrics: Vec<super::metrics::Model>,
}
