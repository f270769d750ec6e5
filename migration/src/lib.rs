pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_users_table;
mod m20250901_000002_create_clients_table;
mod m20250901_000003_create_leads_table;
mod m20250901_000004_create_projects_table;
mod m20250901_000005_create_project_media_table;
mod m20250901_000006_create_project_metrics_table;
mod m20250901_000007_create_invoices_table;
mod m20250901_000008_create_invoice_items_table;
mod m20250901_000009_add_lookup_indexes;
mod m20251010_000001_add_featured_flag_to_projects;
mod m20251102_000001_add_short_description_to_projects;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_users_table::Migration),
            Box::new(m20250901_000002_create_clients_table::Migration),
            Box::new(m20250901_000003_create_leads_table::Migration),
            Box::new(m20250901_000004_create_projects_table::Migration),
            Box::new(m20250901_000005_create_project_media_table::Migration),
            Box::new(m20250901_000006_create_project_metrics_table::Migration),
            Box::new(m20250901_000007_create_invoices_table::Migration),
            Box::new(m20250901_000008_create_invoice_items_table::Migration),
            Box::new(m20250901_000009_add_lookup_indexes::Migration),
            Box::new(m20251010_000001_add_featured_flag_to_projects::Migration),
            Box::new(m20251102_000001_add_short_description_to_projects::Migration),
        ]
    }
}
