//! Create `fabrics` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Fabrics::Table)
                    .if_not_exists()
                    .col(pk_auto(Fabrics::Id))
                    .col(string_len(Fabrics::Name, 200))
                    .col(string_len(Fabrics::Origin, 50).default("Taiwan"))
                    .col(double(Fabrics::Price).default(0.0))
                    .col(string_len(Fabrics::Size, 100).default(""))
                    .col(text(Fabrics::Description))
                    .col(boolean(Fabrics::OnClearance).default(false))
                    .col(double(Fabrics::ClearancePrice).default(0.0))
                    .col(timestamp_with_time_zone(Fabrics::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Fabrics::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Fabrics {
    Table,
    Id,
    Name,
    Origin,
    Price,
    Size,
    Description,
    OnClearance,
    ClearancePrice,
    CreatedAt,
}
