use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use models::{category, order_item, product, product_image};
use super::images::{self, ImageKind, ImageRef};
use crate::errors::ServiceError;

#[derive(Clone, Debug, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub category_id: i32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub promo_price: f64,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, category_id: i32, price: f64) -> Self {
        Self { name: name.into(), category_id, price, size: String::new(), description: String::new(), promo_price: 0.0 }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProductUpdate {
    #[serde(flatten)]
    pub fields: ProductInput,
    #[serde(default)]
    pub images_urls: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: product::Model,
    pub images: Vec<ImageRef>,
}

async fn ensure_category<C: ConnectionTrait>(conn: &C, category_id: i32) -> Result<(), ServiceError> {
    if category::Entity::find_by_id(category_id).one(conn).await?.is_none() {
        return Err(ServiceError::Validation(format!("category {category_id} does not exist")));
    }
    Ok(())
}

pub(crate) async fn views_of<C: ConnectionTrait>(conn: &C, products: Vec<product::Model>) -> Result<Vec<ProductView>, ServiceError> {
    let ids: Vec<i32> = products.iter().map(|p| p.id).collect();
    let mut images = images::rows_for_owners(conn, ImageKind::ProductImage, &ids).await?;
    Ok(products
        .into_iter()
        .map(|p| ProductView { images: images.remove(&p.id).unwrap_or_default(), product: p })
        .collect())
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<ProductView>, ServiceError> {
    let rows = product::Entity::find().order_by_asc(product::Column::Id).all(db).await?;
    views_of(db, rows).await
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<ProductView, ServiceError> {
    let found = product::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("product"))?;
    let images = images::rows(db, ImageKind::ProductImage, id).await?;
    Ok(ProductView { product: found, images })
}

/// Insert a product; the category must already exist.
#[instrument(skip(db, input), fields(name = %input.name, category_id = input.category_id))]
pub async fn create(db: &DatabaseConnection, input: ProductInput) -> Result<ProductView, ServiceError> {
    product::validate_name(&input.name)?;
    let txn = db.begin().await?;
    ensure_category(&txn, input.category_id).await?;
    let created = product::ActiveModel {
        id: NotSet,
        name: Set(input.name),
        price: Set(input.price),
        size: Set(input.size),
        description: Set(input.description),
        promo_price: Set(input.promo_price),
        created_at: Set(Utc::now().into()),
        category_id: Set(input.category_id),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(product_id = created.id, "product_created");
    Ok(ProductView { product: created, images: vec![] })
}

#[instrument(skip(db, update))]
pub async fn update(db: &DatabaseConnection, id: i32, update: ProductUpdate) -> Result<ProductView, ServiceError> {
    let ProductUpdate { fields, images_urls } = update;
    product::validate_name(&fields.name)?;

    let txn = db.begin().await?;
    let mut am: product::ActiveModel = product::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("product"))?
        .into();
    ensure_category(&txn, fields.category_id).await?;
    am.name = Set(fields.name);
    am.category_id = Set(fields.category_id);
    am.price = Set(fields.price);
    am.size = Set(fields.size);
    am.description = Set(fields.description);
    am.promo_price = Set(fields.promo_price);
    am.update(&txn).await?;
    txn.commit().await?;

    if let Some(urls) = images_urls {
        reconcile_images(db, id, &urls).await.map_err(|e| {
            warn!(product_id = id, error = %e, "product_images_reconcile_failed");
            e
        })?;
    }
    info!(product_id = id, "product_updated");
    get(db, id).await
}

async fn reconcile_images(db: &DatabaseConnection, id: i32, urls: &[String]) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    images::reconcile(&txn, ImageKind::ProductImage, id, urls).await?;
    txn.commit().await?;
    Ok(())
}

/// Remove a product and its images. Products referenced by order items stay.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if product::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found("product"));
    }
    let referenced = order_item::Entity::find()
        .filter(order_item::Column::ProductId.eq(id))
        .count(&txn)
        .await?;
    if referenced > 0 {
        return Err(ServiceError::Conflict(format!("product {id} is referenced by {referenced} order item(s)")));
    }
    product_image::Entity::delete_many().filter(product_image::Column::ProductId.eq(id)).exec(&txn).await?;
    product::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(product_id = id, "product_deleted");
    Ok(())
}
