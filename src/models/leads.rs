use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lead status stored as a lowercase string in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum LeadStatus {
    #[sea_orm(string_value = "new")]
    New,
    #[sea_orm(string_value = "contacted")]
    Contacted,
    #[sea_orm(string_value = "converted")]
    Converted,
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// SeaORM entity for the `leads` table. Leads stand alone until an
/// admin converts one into a client.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub source: String,
    pub status: LeadStatus,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLead {
    pub name: String,
    pub email: String,
    pub message: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLeadStatus {
    pub status: LeadStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeadListQuery {
    pub status: Option<LeadStatus>,
}

/// Public contact-form body; becomes a lead with source "Contact Form".
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}
