//! Read-only listings for the storefront.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use models::{category, fabric, product};
use crate::catalog::{categories, fabrics, products};
use crate::errors::ServiceError;

pub async fn list_fabrics(db: &DatabaseConnection) -> Result<Vec<fabrics::FabricView>, ServiceError> {
    fabrics::list(db).await
}

/// Fabrics currently on clearance.
pub async fn list_clearance_fabrics(db: &DatabaseConnection) -> Result<Vec<fabrics::FabricView>, ServiceError> {
    let rows = fabric::Entity::find()
        .filter(fabric::Column::OnClearance.eq(true))
        .order_by_asc(fabric::Column::Id)
        .all(db)
        .await?;
    fabrics::views_of(db, rows).await
}

pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>, ServiceError> {
    categories::list(db).await
}

/// Products of one category; an unknown category yields an empty list.
pub async fn list_products_by_category(db: &DatabaseConnection, category_id: i32) -> Result<Vec<products::ProductView>, ServiceError> {
    let rows = product::Entity::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;
    products::views_of(db, rows).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::images::{self, ImageKind};
    use crate::test_support::{get_db, seed_fabric, seed_product};

    #[tokio::test]
    async fn clearance_filter() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed_fabric(&db, "regular", false).await?;
        let sale = seed_fabric(&db, "sale", true).await?;
        images::append(&db, ImageKind::FabricImage, sale.id, &["/sale.jpg".to_string()]).await?;

        assert_eq!(list_fabrics(&db).await?.len(), 2);
        let clearance = list_clearance_fabrics(&db).await?;
        assert_eq!(clearance.len(), 1);
        assert_eq!(clearance[0].fabric.name, "sale");
        assert_eq!(clearance[0].images.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn products_by_category() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = seed_product(&db, 10.0, 0.0).await?;
        seed_product(&db, 20.0, 0.0).await?;

        let found = list_products_by_category(&db, a.category_id).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product.id, a.id);
        assert!(list_products_by_category(&db, 31337).await?.is_empty());
        assert_eq!(list_categories(&db).await?.len(), 2);
        Ok(())
    }
}
