use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `project_metrics` table and its columns.
#[derive(DeriveIden)]
enum ProjectMetrics {
    Table,
    Id,
    ProjectId,
    IconType,
    IconValue,
    MetricValue,
    MetricLabel,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectMetrics::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectMetrics::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(ProjectMetrics::IconType).string().not_null())
                    .col(
                        ColumnDef::new(ProjectMetrics::IconValue)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectMetrics::MetricValue)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectMetrics::MetricLabel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectMetrics::DisplayOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectMetrics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectMetrics::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_metrics_project_id")
                            .from(ProjectMetrics::Table, ProjectMetrics::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectMetrics::Table).to_owned())
            .await
    }
}
