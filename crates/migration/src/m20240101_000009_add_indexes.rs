use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const OWNER_INDEXES: [(&str, &str, &str); 5] = [
    ("idx_fabric_images_fabric", "fabric_images", "fabric_id"),
    ("idx_fabric_works_fabric", "fabric_works", "fabric_id"),
    ("idx_product_images_product", "product_images", "product_id"),
    ("idx_products_category", "products", "category_id"),
    ("idx_order_items_order", "order_items", "order_id"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Child rows are always read by owner
        for (name, table, col) in OWNER_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Alias::new(table))
                        .col(Alias::new(col))
                        .to_owned(),
                )
                .await?;
        }

        // Fabrics: public clearance listing
        manager
            .create_index(
                Index::create()
                    .name("idx_fabrics_on_clearance")
                    .table(Fabrics::Table)
                    .col(Fabrics::OnClearance)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in OWNER_INDEXES {
            manager
                .drop_index(Index::drop().name(name).table(Alias::new(table)).to_owned())
                .await?;
        }
        manager
            .drop_index(Index::drop().name("idx_fabrics_on_clearance").table(Fabrics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Fabrics { Table, OnClearance }
