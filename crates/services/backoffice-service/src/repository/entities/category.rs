//! Category database entity for SeaORM.

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Category;

use crate::repository::{generated_key, NoInclude, Record};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub display_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Category {
            id: model.id,
            name: model.name,
            display_order: model.display_order,
        }
    }
}

#[async_trait]
impl Record for Category {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Key = i32;
    type Include = NoInclude;

    const NAME: &'static str = "category";

    fn key(&self) -> Option<i32> {
        (self.id != 0).then_some(self.id)
    }

    fn from_model(model: Model) -> Self {
        model.into()
    }

    fn to_active_model(&self) -> ActiveModel {
        ActiveModel {
            id: generated_key(self.id),
            name: Set(self.name.clone()),
            display_order: Set(self.display_order),
        }
    }
}
