//! Application user database entity for SeaORM.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryFilter, Set};

use domain::{ApplicationUser, Company, UserRole};

use crate::repository::Record;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub user_name: String,
    pub email: String,
    pub name: String,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
    /// Set only while the user holds the Company role
    pub company_id: Option<i32>,
    pub lockout_end: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
    #[sea_orm(has_one = "super::user_role::Entity")]
    Membership,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Membership.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Related data a user query can load eagerly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInclude {
    Company,
    Role,
}

/// Convert database model to domain entity
impl From<Model> for ApplicationUser {
    fn from(model: Model) -> Self {
        ApplicationUser {
            id: model.id,
            user_name: model.user_name,
            email: model.email,
            name: model.name,
            street_address: model.street_address,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            phone_number: model.phone_number,
            company_id: model.company_id,
            lockout_end: model.lockout_end,
            company: None,
            role: None,
        }
    }
}

#[async_trait]
impl Record for ApplicationUser {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Key = String;
    type Include = UserInclude;

    const NAME: &'static str = "user";

    fn key(&self) -> Option<String> {
        (!self.id.is_empty()).then(|| self.id.clone())
    }

    fn from_model(model: Model) -> Self {
        model.into()
    }

    fn to_active_model(&self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id.clone()),
            user_name: Set(self.user_name.clone()),
            email: Set(self.email.clone()),
            name: Set(self.name.clone()),
            street_address: Set(self.street_address.clone()),
            city: Set(self.city.clone()),
            state: Set(self.state.clone()),
            postal_code: Set(self.postal_code.clone()),
            phone_number: Set(self.phone_number.clone()),
            company_id: Set(self.company_id),
            lockout_end: Set(self.lockout_end),
        }
    }

    async fn load_includes(
        records: &mut [Self],
        includes: &[UserInclude],
        db: &DatabaseConnection,
    ) -> Result<(), DbErr> {
        if records.is_empty() {
            return Ok(());
        }

        if includes.contains(&UserInclude::Company) {
            let ids: Vec<i32> = records.iter().filter_map(|u| u.company_id).collect();
            let companies: HashMap<i32, Company> = if ids.is_empty() {
                HashMap::new()
            } else {
                super::company::Entity::find()
                    .filter(super::company::Column::Id.is_in(ids))
                    .all(db)
                    .await?
                    .into_iter()
                    .map(|m| (m.id, Company::from(m)))
                    .collect()
            };
            for user in records.iter_mut() {
                user.company = user.company_id.and_then(|id| companies.get(&id).cloned());
            }
        }

        if includes.contains(&UserInclude::Role) {
            let ids: Vec<String> = records.iter().map(|u| u.id.clone()).collect();
            let rows = super::user_role::Entity::find()
                .filter(super::user_role::Column::UserId.is_in(ids))
                .find_also_related(super::role::Entity)
                .all(db)
                .await?;

            let mut roles: HashMap<String, UserRole> = HashMap::new();
            for (membership, role) in rows {
                let Some(role) = role else { continue };
                match role.name.parse::<UserRole>() {
                    Ok(parsed) => {
                        roles.insert(membership.user_id, parsed);
                    }
                    Err(e) => {
                        tracing::warn!(user_id = %membership.user_id, "Skipping role: {}", e);
                    }
                }
            }
            for user in records.iter_mut() {
                user.role = roles.get(&user.id).copied();
            }
        }

        Ok(())
    }
}
