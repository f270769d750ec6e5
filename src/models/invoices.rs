use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice status stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum InvoiceStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "sent")]
    Sent,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "overdue")]
    Overdue,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// SeaORM entity for the `invoices` table. Monetary totals are a
/// snapshot computed when the invoice is created, never on read.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub project_id: Option<Uuid>,
    #[sea_orm(unique)]
    pub invoice_number: String,
    pub status: InvoiceStatus,
    pub currency: String,
    pub issue_date: DateTimeUtc,
    pub due_date: Option<DateTimeUtc>,
    pub paid_date: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub terms: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub subtotal: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub tax_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub tax_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Project,
    #[sea_orm(has_many = "super::invoice_items::Entity")]
    Items,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::invoice_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub client_id: Uuid,
    pub project_id: Option<Uuid>,
    pub currency: Option<String>,
    pub issue_date: Option<DateTimeUtc>,
    pub due_date: Option<DateTimeUtc>,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub tax_rate: Option<Decimal>,
    pub items: Vec<super::invoice_items::CreateInvoiceItem>,
}

/// Header-only partial update; totals stay as created.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoice {
    pub project_id: Option<Uuid>,
    pub status: Option<InvoiceStatus>,
    pub currency: Option<String>,
    pub issue_date: Option<DateTimeUtc>,
    pub due_date: Option<DateTimeUtc>,
    pub notes: Option<String>,
    pub terms: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceListQuery {
    pub status: Option<InvoiceStatus>,
    pub client_id: Option<Uuid>,
}

/// An invoice with its line items, used by detail reads and create.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub invoice: Model,
    pub items: Vec<super::invoice_items::InvoiceItemView>,
}

impl InvoiceDetail {
    pub fn new(invoice: Model, items: Vec<super::invoice_items::Model>) -> Self {
        Self {
            invoice,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}
