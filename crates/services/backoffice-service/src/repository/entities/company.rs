//! Company database entity for SeaORM.

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Company;

use crate::repository::{generated_key, NoInclude, Record};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user::Entity")]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Company {
    fn from(model: Model) -> Self {
        Company {
            id: model.id,
            name: model.name,
            street_address: model.street_address,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            phone_number: model.phone_number,
        }
    }
}

#[async_trait]
impl Record for Company {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Key = i32;
    type Include = NoInclude;

    const NAME: &'static str = "company";

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
            street_address: Set(self.street_address.clone()),
            city: Set(self.city.clone()),
            state: Set(self.state.clone()),
            postal_code: Set(self.postal_code.clone()),
            phone_number: Set(self.phone_number.clone()),
        }
    }
}
