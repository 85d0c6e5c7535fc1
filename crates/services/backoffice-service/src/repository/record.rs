//! Per-entity capability the generic store is built on.

use std::fmt::Debug;
use std::hash::Hash;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, ModelTrait,
};

/// Include set for entities without navigable relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoInclude {}

/// A domain type that can be stored through a [`Store`](super::Store).
///
/// Ties the domain value to its SeaORM entity, names its identity, and lists
/// the related data that can be loaded alongside it.
#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Send
        + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + Send
        + Sync
        + 'static;
    type Key: Clone + Eq + Hash + Debug + Send + Sync + 'static;
    /// Closed set of relations `get`/`get_all` can load eagerly
    type Include: Copy + Eq + Debug + Send + Sync + 'static;

    /// Entity name used in logs and errors
    const NAME: &'static str;

    /// Identifier, or `None` while the record has not been persisted
    fn key(&self) -> Option<Self::Key>;

    fn from_model(model: Self::Model) -> Self;

    /// Every column set, so an update replaces the whole row
    fn to_active_model(&self) -> Self::ActiveModel;

    /// Fill the transient relation fields named by `includes`
    async fn load_includes(
        records: &mut [Self],
        includes: &[Self::Include],
        db: &DatabaseConnection,
    ) -> Result<(), DbErr> {
        let _ = (records, includes, db);
        Ok(())
    }
}

/// Integer key that storage generates when left at zero
pub fn generated_key(id: i32) -> ActiveValue<i32> {
    if id == 0 {
        ActiveValue::NotSet
    } else {
        ActiveValue::Set(id)
    }
}
