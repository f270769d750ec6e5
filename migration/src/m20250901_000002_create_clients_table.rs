use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `clients` table and its columns.
#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    UserId,
    CompanyName,
    ContactName,
    ContactEmail,
    Phone,
    Address,
    City,
    State,
    PostalCode,
    Country,
    TaxId,
    Notes,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clients::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Clients::UserId).uuid().not_null())
                    .col(ColumnDef::new(Clients::CompanyName).string())
                    .col(ColumnDef::new(Clients::ContactName).string().not_null())
                    .col(ColumnDef::new(Clients::ContactEmail).string().not_null())
                    .col(ColumnDef::new(Clients::Phone).string())
                    .col(ColumnDef::new(Clients::Address).string())
                    .col(ColumnDef::new(Clients::City).string())
                    .col(ColumnDef::new(Clients::State).string())
                    .col(ColumnDef::new(Clients::PostalCode).string())
                    .col(ColumnDef::new(Clients::Country).string())
                    .col(ColumnDef::new(Clients::TaxId).string())
                    .col(ColumnDef::new(Clients::Notes).text())
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Clients::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clients_user_id")
                            .from(Clients::Table, Clients::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}
