use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{fabric, order, product};

pub const DEFAULT_STATE: &str = "blank";

/// One line of an order. `original_price` and `final_price` are snapshots
/// taken when the order is placed; later product price changes do not touch them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub fabric_id: Option<i32>,
    pub state: String,
    pub original_price: f64,
    pub adjustment: f64,
    pub final_price: f64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Order,
    Product,
    Fabric,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Order => Entity::belongs_to(order::Entity)
                .from(Column::OrderId)
                .to(order::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Product => Entity::belongs_to(product::Entity)
                .from(Column::ProductId)
                .to(product::Column::Id)
                .into(),
            Relation::Fabric => Entity::belongs_to(fabric::Entity)
                .from(Column::FabricId)
                .to(fabric::Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
        }
    }
}

impl Related<order::Entity> for Entity {
    fn to() -> RelationDef { Relation::Order.def() }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { Relation::Product.def() }
}

impl Related<fabric::Entity> for Entity {
    fn to() -> RelationDef { Relation::Fabric.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// `final_price` for a line: base plus the signed adjustment, unclamped.
pub fn final_price(base: f64, adjustment: f64) -> f64 {
    base + adjustment
}
