//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_category;
mod m20240101_000002_create_fabric;
mod m20240101_000003_create_fabric_image;
mod m20240101_000004_create_fabric_work;
mod m20240101_000005_create_product;
mod m20240101_000006_create_product_image;
mod m20240101_000007_create_order;
mod m20240101_000008_create_order_item;
mod m20240101_000009_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_category::Migration),
            Box::new(m20240101_000002_create_fabric::Migration),
            Box::new(m20240101_000003_create_fabric_image::Migration),
            Box::new(m20240101_000004_create_fabric_work::Migration),
            Box::new(m20240101_000005_create_product::Migration),
            Box::new(m20240101_000006_create_product_image::Migration),
            Box::new(m20240101_000007_create_order::Migration),
            Box::new(m20240101_000008_create_order_item::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000009_add_indexes::Migration),
        ]
    }
}
