use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `project_media` table and its columns.
#[derive(DeriveIden)]
enum ProjectMedia {
    Table,
    Id,
    ProjectId,
    MediaType,
    Url,
    AltText,
    DisplayOrder,
    CreatedAt,
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
                    .table(ProjectMedia::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectMedia::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectMedia::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(ProjectMedia::MediaType).string().not_null())
                    .col(ColumnDef::new(ProjectMedia::Url).string().not_null())
                    .col(ColumnDef::new(ProjectMedia::AltText).string())
                    .col(
                        ColumnDef::new(ProjectMedia::DisplayOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectMedia::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_media_project_id")
                            .from(ProjectMedia::Table, ProjectMedia::ProjectId)
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
            .drop_table(Table::drop().table(ProjectMedia::Table).to_owned())
            .await
    }
}
