pub mod clients;
pub mod invoices;
pub mod leads;
pub mod media;
pub mod metrics;
pub mod projects;
pub mod users;

use sea_orm::{Database, DatabaseConnection};

/// Create a SeaORM database connection pool for the configured URL.
pub async fn create_pool(database_url: &str) -> DatabaseConnection {
    Database::connect(database_url)
        .await
        .expect("Failed to connect to database")
}
