//! Photos of finished pieces sewn from a fabric.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fabric;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fabric_works")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fabric_id: i32,
    pub url: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Fabric,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Fabric => Entity::belongs_to(fabric::Entity)
                .from(Column::FabricId)
                .to(fabric::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<fabric::Entity> for Entity {
    fn to() -> RelationDef { Relation::Fabric.def() }
}

impl ActiveModelBehavior for ActiveModel {}
