//! Generic entity store.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use sea_orm::sea_query::IntoCondition;
use sea_orm::{
    Condition, DatabaseConnection, EntityTrait, Iterable, PrimaryKeyToColumn, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use common::AppResult;

use super::change_set::{ChangeKind, ChangeSet, Staged};
use super::Record;

/// Whether `get` registers the result with the unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tracking {
    /// Registered, so it can later be removed through the store
    Tracked,
    /// Snapshot only; removing it is a no-op
    #[default]
    Detached,
}

/// Query and staging surface over one entity type.
///
/// Stores are created by a unit of work and share its change set; nothing
/// staged here reaches the database until the unit of work saves.
pub struct Store<R: Record> {
    db: DatabaseConnection,
    changes: Arc<ChangeSet>,
    tracked: Mutex<HashSet<R::Key>>,
}

impl<R: Record> Store<R> {
    pub(crate) fn new(db: DatabaseConnection, changes: Arc<ChangeSet>) -> Self {
        Self {
            db,
            changes,
            tracked: Mutex::new(HashSet::new()),
        }
    }

    /// Every record matching `filter` (all records when `None`), ordered by
    /// primary key, with the requested relations loaded.
    ///
    /// Returned records are tracked.
    pub async fn get_all(
        &self,
        filter: Option<Condition>,
        includes: &[R::Include],
    ) -> AppResult<Vec<R>> {
        let models = Self::select(filter).all(&self.db).await?;
        let mut records: Vec<R> = models.into_iter().map(R::from_model).collect();

        R::load_includes(&mut records, includes, &self.db).await?;
        self.track(&records);

        tracing::debug!(entity = R::NAME, count = records.len(), "Loaded records");
        Ok(records)
    }

    /// First record matching `filter`, or `None`.
    ///
    /// `filter` should identify at most one row. When several match, the one
    /// with the lowest primary key is returned and a warning is logged.
    pub async fn get<F>(
        &self,
        filter: F,
        includes: &[R::Include],
        tracking: Tracking,
    ) -> AppResult<Option<R>>
    where
        F: IntoCondition,
    {
        let models = Self::select(Some(filter.into_condition()))
            .limit(2u64)
            .all(&self.db)
            .await?;

        if models.len() > 1 {
            tracing::warn!(entity = R::NAME, "Filter matched more than one row; using the first");
        }
        let Some(model) = models.into_iter().next() else {
            return Ok(None);
        };

        let mut records = vec![R::from_model(model)];
        R::load_includes(&mut records, includes, &self.db).await?;
        if tracking == Tracking::Tracked {
            self.track(&records);
        }

        Ok(records.pop())
    }

    /// Stage an insert. Business validation belongs to the caller.
    pub fn add(&self, record: R) {
        tracing::debug!(entity = R::NAME, key = ?record.key(), "Staging insert");
        if let Some(key) = record.key() {
            self.tracked.lock().insert(key);
        }
        self.changes.push(Staged::new(ChangeKind::Insert, &record));
    }

    /// Stage a whole-record update matched by identifier.
    pub fn update(&self, record: R) {
        tracing::debug!(entity = R::NAME, key = ?record.key(), "Staging update");
        if let Some(key) = record.key() {
            self.tracked.lock().insert(key);
        }
        self.changes.push(Staged::new(ChangeKind::Update, &record));
    }

    /// Stage a delete. Returns `false` without staging anything when the
    /// record is not tracked by this store.
    pub fn remove(&self, record: &R) -> bool {
        let untracked = match record.key() {
            Some(key) => !self.tracked.lock().remove(&key),
            None => true,
        };
        if untracked {
            tracing::debug!(entity = R::NAME, key = ?record.key(), "Ignoring remove of untracked record");
            return false;
        }

        tracing::debug!(entity = R::NAME, key = ?record.key(), "Staging delete");
        self.changes.push(Staged::new(ChangeKind::Delete, record));
        true
    }

    /// Stage deletes for every tracked record; returns how many were staged.
    pub fn remove_range<'r, I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = &'r R>,
    {
        let mut staged = 0;
        for record in records {
            if self.remove(record) {
                staged += 1;
            }
        }
        staged
    }

    /// Check whether a key is registered with this store
    pub fn is_tracked(&self, key: &R::Key) -> bool {
        self.tracked.lock().contains(key)
    }

    fn track(&self, records: &[R]) {
        let mut tracked = self.tracked.lock();
        tracked.extend(records.iter().filter_map(|r| r.key()));
    }

    fn select(filter: Option<Condition>) -> Select<R::Entity> {
        let mut query = <R::Entity as EntityTrait>::find();
        if let Some(filter) = filter {
            query = query.filter(filter);
        }
        for key in <<R::Entity as EntityTrait>::PrimaryKey as Iterable>::iter() {
            query = query.order_by_asc(key.into_column());
        }
        query
    }
}
