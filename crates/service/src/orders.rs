//! Order entry. Line prices are snapshotted when the order is placed.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument};

use models::{fabric, order, order_item, product};
use crate::errors::ServiceError;

fn default_order_status() -> String {
    order::DEFAULT_ORDER_STATUS.to_string()
}

fn default_payment_status() -> String {
    order::DEFAULT_PAYMENT_STATUS.to_string()
}

fn default_item_state() -> String {
    order_item::DEFAULT_STATE.to_string()
}

/// One requested line. Used both on order creation and item update.
#[derive(Clone, Debug, Deserialize)]
pub struct OrderItemInput {
    pub product_id: i32,
    #[serde(default)]
    pub fabric_id: Option<i32>,
    #[serde(default = "default_item_state")]
    pub state: String,
    #[serde(default)]
    pub adjustment: f64,
    #[serde(default)]
    pub description: String,
}

impl OrderItemInput {
    pub fn for_product(product_id: i32) -> Self {
        Self { product_id, fabric_id: None, state: default_item_state(), adjustment: 0.0, description: String::new() }
    }
}

/// Header fields of an order; full replace on update.
#[derive(Clone, Debug, Deserialize)]
pub struct OrderUpdate {
    pub customer_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_order_status")]
    pub order_status: String,
    #[serde(default = "default_payment_status")]
    pub payment_status: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewOrder {
    pub customer_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_order_status")]
    pub order_status: String,
    #[serde(default = "default_payment_status")]
    pub payment_status: String,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

impl NewOrder {
    pub fn for_customer(customer_name: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            description: String::new(),
            order_status: default_order_status(),
            payment_status: default_payment_status(),
            items: vec![],
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: order::Model,
    pub items: Vec<order_item::Model>,
}

async fn effective_price_of<C: ConnectionTrait>(conn: &C, product_id: i32) -> Result<f64, ServiceError> {
    let p = product::Entity::find_by_id(product_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::Validation(format!("product {product_id} does not exist")))?;
    Ok(p.effective_price())
}

async fn ensure_fabric<C: ConnectionTrait>(conn: &C, fabric_id: Option<i32>) -> Result<(), ServiceError> {
    if let Some(fid) = fabric_id {
        if fabric::Entity::find_by_id(fid).one(conn).await?.is_none() {
            return Err(ServiceError::Validation(format!("fabric {fid} does not exist")));
        }
    }
    Ok(())
}

async fn items_of<C: ConnectionTrait>(conn: &C, order_id: i32) -> Result<Vec<order_item::Model>, ServiceError> {
    Ok(order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(conn)
        .await?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<OrderView>, ServiceError> {
    let orders = order::Entity::find().order_by_asc(order::Column::Id).all(db).await?;
    let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let mut grouped: HashMap<i32, Vec<order_item::Model>> = HashMap::new();
    if !ids.is_empty() {
        let items = order_item::Entity::find()
            .filter(order_item::Column::OrderId.is_in(ids))
            .order_by_asc(order_item::Column::Id)
            .all(db)
            .await?;
        for it in items {
            grouped.entry(it.order_id).or_default().push(it);
        }
    }
    Ok(orders
        .into_iter()
        .map(|o| OrderView { items: grouped.remove(&o.id).unwrap_or_default(), order: o })
        .collect())
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<OrderView, ServiceError> {
    let found = order::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("order"))?;
    let items = items_of(db, id).await?;
    Ok(OrderView { order: found, items })
}

/// Place an order with its lines. Nothing is persisted unless every line resolves.
#[instrument(skip(db, new), fields(items = new.items.len()))]
pub async fn create(db: &DatabaseConnection, new: NewOrder) -> Result<OrderView, ServiceError> {
    order::validate_customer_name(&new.customer_name)?;

    let txn = db.begin().await?;
    let created = order::ActiveModel {
        id: NotSet,
        customer_name: Set(new.customer_name),
        description: Set(new.description),
        order_status: Set(new.order_status),
        payment_status: Set(new.payment_status),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(new.items.len());
    for it in new.items {
        let base = effective_price_of(&txn, it.product_id).await?;
        ensure_fabric(&txn, it.fabric_id).await?;
        let line = order_item::ActiveModel {
            id: NotSet,
            order_id: Set(created.id),
            product_id: Set(it.product_id),
            fabric_id: Set(it.fabric_id),
            state: Set(it.state),
            original_price: Set(base),
            adjustment: Set(it.adjustment),
            final_price: Set(order_item::final_price(base, it.adjustment)),
            description: Set(it.description),
        }
        .insert(&txn)
        .await?;
        items.push(line);
    }
    txn.commit().await?;

    info!(order_id = created.id, items = items.len(), "order_created");
    Ok(OrderView { order: created, items })
}

/// Replace the header fields. Lines are untouched.
#[instrument(skip(db, update))]
pub async fn update(db: &DatabaseConnection, id: i32, update: OrderUpdate) -> Result<OrderView, ServiceError> {
    order::validate_customer_name(&update.customer_name)?;
    let txn = db.begin().await?;
    let mut am: order::ActiveModel = order::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("order"))?
        .into();
    am.customer_name = Set(update.customer_name);
    am.description = Set(update.description);
    am.order_status = Set(update.order_status);
    am.payment_status = Set(update.payment_status);
    let updated = am.update(&txn).await?;
    let items = items_of(&txn, id).await?;
    txn.commit().await?;
    info!(order_id = id, "order_updated");
    Ok(OrderView { order: updated, items })
}

/// Overwrite the editable fields of one line. `original_price` and
/// `final_price` keep their snapshot values even when `adjustment` or the
/// product changes.
#[instrument(skip(db, input))]
pub async fn update_item(db: &DatabaseConnection, item_id: i32, input: OrderItemInput) -> Result<order_item::Model, ServiceError> {
    let txn = db.begin().await?;
    let mut am: order_item::ActiveModel = order_item::Entity::find_by_id(item_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("order item"))?
        .into();
    if product::Entity::find_by_id(input.product_id).one(&txn).await?.is_none() {
        return Err(ServiceError::Validation(format!("product {} does not exist", input.product_id)));
    }
    ensure_fabric(&txn, input.fabric_id).await?;
    am.product_id = Set(input.product_id);
    am.fabric_id = Set(input.fabric_id);
    am.state = Set(input.state);
    am.adjustment = Set(input.adjustment);
    am.description = Set(input.description);
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(order_item_id = item_id, "order_item_updated");
    Ok(updated)
}

/// Delete an order, lines first.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if order::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found("order"));
    }
    order_item::Entity::delete_many().filter(order_item::Column::OrderId.eq(id)).exec(&txn).await?;
    order::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(order_id = id, "order_deleted");
    Ok(())
}
