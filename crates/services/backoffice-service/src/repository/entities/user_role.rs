//! Role membership database entity for SeaORM.
//!
//! The user id is the primary key, so a user can hold at most one role.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryFilter, Set};

use domain::{IdentityRole, RoleMembership};

use crate::repository::Record;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub role_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Related data a membership query can load eagerly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipInclude {
    Role,
}

/// Convert database model to domain entity
impl From<Model> for RoleMembership {
    fn from(model: Model) -> Self {
        RoleMembership {
            user_id: model.user_id,
            role_id: model.role_id,
            role: None,
        }
    }
}

#[async_trait]
impl Record for RoleMembership {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Key = String;
    type Include = MembershipInclude;

    const NAME: &'static str = "role membership";

    fn key(&self) -> Option<String> {
        (!self.user_id.is_empty()).then(|| self.user_id.clone())
    }

    fn from_model(model: Model) -> Self {
        model.into()
    }

    fn to_active_model(&self) -> ActiveModel {
        ActiveModel {
            user_id: Set(self.user_id.clone()),
            role_id: Set(self.role_id.clone()),
        }
    }

    async fn load_includes(
        records: &mut [Self],
        includes: &[MembershipInclude],
        db: &DatabaseConnection,
    ) -> Result<(), DbErr> {
        if records.is_empty() || !includes.contains(&MembershipInclude::Role) {
            return Ok(());
        }

        let ids: Vec<String> = records.iter().map(|m| m.role_id.clone()).collect();
        let roles: HashMap<String, IdentityRole> = super::role::Entity::find()
            .filter(super::role::Column::Id.is_in(ids))
            .all(db)
            .await?
            .into_iter()
            .map(|m| (m.id.clone(), IdentityRole::from(m)))
            .collect();

        for membership in records.iter_mut() {
            membership.role = roles.get(&membership.role_id).cloned();
        }
        Ok(())
    }
}
