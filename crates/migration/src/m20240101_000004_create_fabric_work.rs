//! Create `fabric_works` table.
//! Ordered gallery rows owned by a fabric; removed with their fabric.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FabricWorks::Table)
                    .if_not_exists()
                    .col(pk_auto(FabricWorks::Id))
                    .col(integer(FabricWorks::FabricId))
                    .col(string_len(FabricWorks::Url, 500))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fabric_works_fabric")
                            .from(FabricWorks::Table, FabricWorks::FabricId)
                            .to(Fabrics::Table, Fabrics::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FabricWorks::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum FabricWorks { Table, Id, FabricId, Url }

#[derive(DeriveIden)]
enum Fabrics { Table, Id }
