//! Identity role database entity for SeaORM.

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::IdentityRole;

use crate::repository::{NoInclude, Record};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRole,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for IdentityRole {
    fn from(model: Model) -> Self {
        IdentityRole {
            id: model.id,
            name: model.name,
        }
    }
}

#[async_trait]
impl Record for IdentityRole {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Key = String;
    type Include = NoInclude;

    const NAME: &'static str = "role";

    fn key(&self) -> Option<String> {
        (!self.id.is_empty()).then(|| self.id.clone())
    }

    fn from_model(model: Model) -> Self {
        model.into()
    }

    fn to_active_model(&self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id.clone()),
            name: Set(self.name.clone()),
        }
    }
}
