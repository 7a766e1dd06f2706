#![cfg(test)]
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, NotSet, Set};
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use models::{category, product};

/// A fresh in-memory database with every migration applied. Each call gets
/// its own database, so tests never see each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Insert a category and a product priced `price` / `promo_price` below it.
pub async fn seed_product(db: &DatabaseConnection, price: f64, promo_price: f64) -> Result<product::Model, anyhow::Error> {
    let cat = category::ActiveModel {
        id: NotSet,
        name: Set(format!("cat_{}", uuid::Uuid::new_v4())),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;
    let p = product::ActiveModel {
        id: NotSet,
        name: Set("seed product".into()),
        price: Set(price),
        size: Set(String::new()),
        description: Set(String::new()),
        promo_price: Set(promo_price),
        created_at: Set(Utc::now().into()),
        category_id: Set(cat.id),
    }
    .insert(db)
    .await?;
    Ok(p)
}

/// Insert a plain fabric row.
pub async fn seed_fabric(db: &DatabaseConnection, name: &str, on_clearance: bool) -> Result<models::fabric::Model, anyhow::Error> {
    let f = models::fabric::ActiveModel {
        id: NotSet,
        name: Set(name.into()),
        origin: Set(models::fabric::DEFAULT_ORIGIN.into()),
        price: Set(150.0),
        size: Set("150cm".into()),
        description: Set(String::new()),
        on_clearance: Set(on_clearance),
        clearance_price: Set(if on_clearance { 90.0 } else { 0.0 }),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;
    Ok(f)
}
