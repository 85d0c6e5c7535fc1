//! Product database entity for SeaORM.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryFilter, Set};

use domain::{Category, Product};

use crate::repository::{generated_key, Record};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub isbn: String,
    pub author: String,
    pub list_price: f64,
    pub price: f64,
    pub price50: f64,
    pub price100: f64,
    pub category_id: i32,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Related data a product query can load eagerly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductInclude {
    Category,
}

/// Convert database model to domain entity
impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product {
            id: model.id,
            title: model.title,
            description: model.description,
            isbn: model.isbn,
            author: model.author,
            list_price: model.list_price,
            price: model.price,
            price50: model.price50,
            price100: model.price100,
            category_id: model.category_id,
            image_url: model.image_url,
            category: None,
        }
    }
}

#[async_trait]
impl Record for Product {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Key = i32;
    type Include = ProductInclude;

    const NAME: &'static str = "product";

    fn key(&self) -> Option<i32> {
        (self.id != 0).then_some(self.id)
    }

    fn from_model(model: Model) -> Self {
        model.into()
    }

    fn to_active_model(&self) -> ActiveModel {
        ActiveModel {
            id: generated_key(self.id),
            title: Set(self.title.clone()),
            description: Set(self.description.clone()),
            isbn: Set(self.isbn.clone()),
            author: Set(self.author.clone()),
            list_price: Set(self.list_price),
            price: Set(self.price),
            price50: Set(self.price50),
            price100: Set(self.price100),
            category_id: Set(self.category_id),
            image_url: Set(self.image_url.clone()),
        }
    }

    async fn load_includes(
        records: &mut [Self],
        includes: &[ProductInclude],
        db: &DatabaseConnection,
    ) -> Result<(), DbErr> {
        if records.is_empty() || !includes.contains(&ProductInclude::Category) {
            return Ok(());
        }

        let ids: Vec<i32> = records.iter().map(|p| p.category_id).collect();
        let categories: HashMap<i32, Category> = super::category::Entity::find()
            .filter(super::category::Column::Id.is_in(ids))
            .all(db)
            .await?
            .into_iter()
            .map(|m| (m.id, Category::from(m)))
            .collect();

        for product in records.iter_mut() {
            product.category = categories.get(&product.category_id).cloned();
        }
        Ok(())
    }
}
