use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Clients {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum Invoices {
    Table,
    UserId,
    ClientId,
}

#[derive(DeriveIden)]
enum ProjectMedia {
    Table,
    ProjectId,
}

#[derive(DeriveIden)]
enum ProjectMetrics {
    Table,
    ProjectId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on clients.user_id for the per-user client listing
        manager
            .create_index(
                Index::create()
                    .name("idx_clients_user_id")
                    .table(Clients::Table)
                    .col(Clients::UserId)
                    .to_owned(),
            )
            .await?;

        // Indexes on invoices for the user scope and the client filter
        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_user_id")
                    .table(Invoices::Table)
                    .col(Invoices::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_client_id")
                    .table(Invoices::Table)
                    .col(Invoices::ClientId)
                    .to_owned(),
            )
            .await?;

        // Indexes on the project-scoped child tables
        manager
            .create_index(
                Index::create()
                    .name("idx_project_media_project_id")
                    .table(ProjectMedia::Table)
                    .col(ProjectMedia::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_metrics_project_id")
                    .table(ProjectMetrics::Table)
                    .col(ProjectMetrics::ProjectId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_clients_user_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_invoices_user_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_invoices_client_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_project_media_project_id").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_project_metrics_project_id")
                    .to_owned(),
            )
            .await
    }
}
