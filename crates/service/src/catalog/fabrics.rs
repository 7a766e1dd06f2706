use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use models::{fabric, fabric_image, fabric_work, order_item};
use super::images::{self, ImageKind, ImageRef};
use crate::errors::ServiceError;

fn default_origin() -> String {
    fabric::DEFAULT_ORIGIN.to_string()
}

/// Scalar fields of a fabric, as written on create and on full-replace update.
#[derive(Clone, Debug, Deserialize)]
pub struct FabricInput {
    pub name: String,
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub on_clearance: bool,
    #[serde(default)]
    pub clearance_price: f64,
}

impl FabricInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: default_origin(),
            price: 0.0,
            size: String::new(),
            description: String::new(),
            on_clearance: false,
            clearance_price: 0.0,
        }
    }
}

/// Update payload. An absent list leaves it alone; `[]` clears it.
#[derive(Clone, Debug, Deserialize)]
pub struct FabricUpdate {
    #[serde(flatten)]
    pub fields: FabricInput,
    #[serde(default)]
    pub images_urls: Option<Vec<String>>,
    #[serde(default)]
    pub works_urls: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FabricView {
    #[serde(flatten)]
    pub fabric: fabric::Model,
    pub images: Vec<ImageRef>,
    pub works: Vec<ImageRef>,
}

async fn view_of<C: ConnectionTrait>(conn: &C, fabric: fabric::Model) -> Result<FabricView, ServiceError> {
    let images = images::rows(conn, ImageKind::FabricImage, fabric.id).await?;
    let works = images::rows(conn, ImageKind::FabricWork, fabric.id).await?;
    Ok(FabricView { fabric, images, works })
}

/// Attach nested lists to many fabrics with one query per list.
pub(crate) async fn views_of<C: ConnectionTrait>(conn: &C, fabrics: Vec<fabric::Model>) -> Result<Vec<FabricView>, ServiceError> {
    let ids: Vec<i32> = fabrics.iter().map(|f| f.id).collect();
    let mut images = images::rows_for_owners(conn, ImageKind::FabricImage, &ids).await?;
    let mut works = images::rows_for_owners(conn, ImageKind::FabricWork, &ids).await?;
    Ok(fabrics
        .into_iter()
        .map(|f| FabricView {
            images: images.remove(&f.id).unwrap_or_default(),
            works: works.remove(&f.id).unwrap_or_default(),
            fabric: f,
        })
        .collect())
}

/// All fabrics by id with their lists.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<FabricView>, ServiceError> {
    let rows = fabric::Entity::find().order_by_asc(fabric::Column::Id).all(db).await?;
    views_of(db, rows).await
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<FabricView, ServiceError> {
    let found = fabric::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("fabric"))?;
    view_of(db, found).await
}

#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create(db: &DatabaseConnection, input: FabricInput) -> Result<FabricView, ServiceError> {
    fabric::validate_name(&input.name)?;
    let created = fabric::ActiveModel {
        id: NotSet,
        name: Set(input.name),
        origin: Set(input.origin),
        price: Set(input.price),
        size: Set(input.size),
        description: Set(input.description),
        on_clearance: Set(input.on_clearance),
        clearance_price: Set(input.clearance_price),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;
    info!(fabric_id = created.id, "fabric_created");
    Ok(FabricView { fabric: created, images: vec![], works: vec![] })
}

/// Full replace of the scalar fields, then reconciliation of any supplied
/// list in a second transaction. A failing list step leaves the scalar
/// update committed.
#[instrument(skip(db, update))]
pub async fn update(db: &DatabaseConnection, id: i32, update: FabricUpdate) -> Result<FabricView, ServiceError> {
    let FabricUpdate { fields, images_urls, works_urls } = update;
    fabric::validate_name(&fields.name)?;

    let txn = db.begin().await?;
    let mut am: fabric::ActiveModel = fabric::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("fabric"))?
        .into();
    am.name = Set(fields.name);
    am.origin = Set(fields.origin);
    am.price = Set(fields.price);
    am.size = Set(fields.size);
    am.description = Set(fields.description);
    am.on_clearance = Set(fields.on_clearance);
    am.clearance_price = Set(fields.clearance_price);
    am.update(&txn).await?;
    txn.commit().await?;

    if images_urls.is_some() || works_urls.is_some() {
        reconcile_lists(db, id, images_urls.as_deref(), works_urls.as_deref())
            .await
            .map_err(|e| {
                warn!(fabric_id = id, error = %e, "fabric_lists_reconcile_failed");
                e
            })?;
    }
    info!(fabric_id = id, "fabric_updated");
    get(db, id).await
}

async fn reconcile_lists(
    db: &DatabaseConnection,
    id: i32,
    images_urls: Option<&[String]>,
    works_urls: Option<&[String]>,
) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if let Some(urls) = images_urls {
        images::reconcile(&txn, ImageKind::FabricImage, id, urls).await?;
    }
    if let Some(urls) = works_urls {
        images::reconcile(&txn, ImageKind::FabricWork, id, urls).await?;
    }
    txn.commit().await?;
    Ok(())
}

/// Remove a fabric with its images and works. Order items that used it keep
/// their row with the fabric reference cleared.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if fabric::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found("fabric"));
    }
    order_item::Entity::update_many()
        .col_expr(order_item::Column::FabricId, Expr::value(Option::<i32>::None))
        .filter(order_item::Column::FabricId.eq(id))
        .exec(&txn)
        .await?;
    fabric_image::Entity::delete_many().filter(fabric_image::Column::FabricId.eq(id)).exec(&txn).await?;
    fabric_work::Entity::delete_many().filter(fabric_work::Column::FabricId.eq(id)).exec(&txn).await?;
    fabric::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(fabric_id = id, "fabric_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_product};

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn update_of(name: &str, images_urls: Option<Vec<String>>, works_urls: Option<Vec<String>>) -> FabricUpdate {
        FabricUpdate { fields: FabricInput::named(name), images_urls, works_urls }
    }

    #[test]
    fn update_payload_distinguishes_absent_and_empty() -> Result<(), anyhow::Error> {
        let absent: FabricUpdate = serde_json::from_str(r#"{"name":"a"}"#)?;
        assert!(absent.images_urls.is_none());
        assert_eq!(absent.fields.origin, fabric::DEFAULT_ORIGIN);

        let empty: FabricUpdate = serde_json::from_str(r#"{"name":"a","images_urls":[]}"#)?;
        assert_eq!(empty.images_urls, Some(vec![]));
        assert!(empty.works_urls.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn fabric_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let mut input = FabricInput::named("linen");
        input.price = 320.0;
        let created = create(&db, input).await?;
        assert_eq!(created.fabric.origin, fabric::DEFAULT_ORIGIN);
        assert!(created.images.is_empty());

        let mut fields = FabricInput::named("washed linen");
        fields.on_clearance = true;
        fields.clearance_price = 199.0;
        let updated = update(&db, created.fabric.id, FabricUpdate { fields, images_urls: None, works_urls: None }).await?;
        assert_eq!(updated.fabric.name, "washed linen");
        assert!(updated.fabric.on_clearance);
        // full replace: price falls back to the default
        assert_eq!(updated.fabric.price, 0.0);

        delete(&db, created.fabric.id).await?;
        assert!(matches!(get(&db, created.fabric.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete(&db, created.fabric.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = create(&db, FabricInput::named("  ")).await.unwrap_err();
        assert!(err.is_validation());
        assert!(list(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_reconciles_only_supplied_lists() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = create(&db, FabricInput::named("canvas")).await?.fabric;
        images::replace(&db, ImageKind::FabricImage, f.id, &urls(&["/i1.jpg"])).await?;
        images::replace(&db, ImageKind::FabricWork, f.id, &urls(&["/w1.jpg"])).await?;

        let view = update(&db, f.id, update_of("canvas", Some(urls(&["/i2.jpg", "/i2.jpg", "/i3.jpg"])), None)).await?;
        let imgs: Vec<&str> = view.images.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(imgs, ["/i2.jpg", "/i3.jpg"]);
        assert_eq!(view.works.len(), 1);

        let view = update(&db, f.id, update_of("canvas", None, Some(vec![]))).await?;
        assert_eq!(view.images.len(), 2);
        assert!(view.works.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_nests_lists_per_fabric() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create(&db, FabricInput::named("a")).await?.fabric;
        let b = create(&db, FabricInput::named("b")).await?.fabric;
        images::append(&db, ImageKind::FabricImage, b.id, &urls(&["/b1.jpg", "/b2.jpg"])).await?;
        images::append(&db, ImageKind::FabricWork, a.id, &urls(&["/a-work.jpg"])).await?;

        let all = list(&db).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].fabric.id, a.id);
        assert!(all[0].images.is_empty());
        assert_eq!(all[0].works.len(), 1);
        assert_eq!(all[1].images.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_children_and_detaches_order_items() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = create(&db, FabricInput::named("denim")).await?.fabric;
        images::append(&db, ImageKind::FabricImage, f.id, &urls(&["/d.jpg"])).await?;
        images::append(&db, ImageKind::FabricWork, f.id, &urls(&["/dw.jpg"])).await?;

        let p = seed_product(&db, 100.0, 0.0).await?;
        let order = crate::orders::create(
            &db,
            crate::orders::NewOrder {
                items: vec![crate::orders::OrderItemInput { fabric_id: Some(f.id), ..crate::orders::OrderItemInput::for_product(p.id) }],
                ..crate::orders::NewOrder::for_customer("Lin")
            },
        )
        .await?;

        delete(&db, f.id).await?;
        assert_eq!(fabric_image::Entity::find().all(&db).await?.len(), 0);
        assert_eq!(fabric_work::Entity::find().all(&db).await?.len(), 0);

        let kept = crate::orders::get(&db, order.order.id).await?;
        assert_eq!(kept.items.len(), 1);
        assert_eq!(kept.items[0].fabric_id, None);
        Ok(())
    }
}
