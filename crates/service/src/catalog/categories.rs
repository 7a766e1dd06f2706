use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{info, instrument};

use models::{category, product};
use crate::errors::ServiceError;

pub async fn list(db: &DatabaseConnection) -> Result<Vec<category::Model>, ServiceError> {
    Ok(category::Entity::find().order_by_asc(category::Column::Id).all(db).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<category::Model, ServiceError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("category"))
}

#[instrument(skip(db))]
pub async fn create(db: &DatabaseConnection, name: &str) -> Result<category::Model, ServiceError> {
    category::validate_name(name)?;
    let txn = db.begin().await?;
    if category::find_by_name(&txn, name).await?.is_some() {
        return Err(ServiceError::Conflict(format!("category '{name}' already exists")));
    }
    let created = category::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(category_id = created.id, "category_created");
    Ok(created)
}

/// Rename a category.
#[instrument(skip(db))]
pub async fn update(db: &DatabaseConnection, id: i32, name: &str) -> Result<category::Model, ServiceError> {
    category::validate_name(name)?;
    let txn = db.begin().await?;
    let mut am: category::ActiveModel = category::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("category"))?
        .into();
    if let Some(other) = category::find_by_name(&txn, name).await? {
        if other.id != id {
            return Err(ServiceError::Conflict(format!("category '{name}' already exists")));
        }
    }
    am.name = Set(name.to_string());
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Delete a category that no product uses.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if category::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found("category"));
    }
    let in_use = product::Entity::find().filter(product::Column::CategoryId.eq(id)).count(&txn).await?;
    if in_use > 0 {
        return Err(ServiceError::Conflict(format!("category {id} still has {in_use} product(s)")));
    }
    category::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(category_id = id, "category_deleted");
    Ok(())
}
