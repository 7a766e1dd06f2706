//! Create `fabric_images` table.
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
                    .table(FabricImages::Table)
                    .if_not_exists()
                    .col(pk_auto(FabricImages::Id))
                    .col(integer(FabricImages::FabricId))
                    .col(string_len(FabricImages::Url, 500))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fabric_images_fabric")
                            .from(FabricImages::Table, FabricImages::FabricId)
                            .to(Fabrics::Table, Fabrics::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FabricImages::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum FabricImages { Table, Id, FabricId, Url }

#[derive(DeriveIden)]
enum Fabrics { Table, Id }
