//! Staged mutations awaiting a unit-of-work commit.

use std::marker::PhantomData;

use async_trait::async_trait;
use parking_lot::Mutex;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait,
};

use super::Record;

/// What a staged change does to its row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One staged mutation with its entity type erased.
#[async_trait]
pub(crate) trait PendingChange: Send + Sync {
    fn kind(&self) -> ChangeKind;

    fn entity(&self) -> &'static str;

    async fn apply(&self, txn: &DatabaseTransaction) -> Result<(), DbErr>;
}

/// Staged mutation of a record of type `R`.
pub(crate) struct Staged<R: Record> {
    kind: ChangeKind,
    active: R::ActiveModel,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Staged<R> {
    pub(crate) fn new(kind: ChangeKind, record: &R) -> Box<dyn PendingChange> {
        Box::new(Self {
            kind,
            active: record.to_active_model(),
            _record: PhantomData,
        })
    }
}

#[async_trait]
impl<R: Record> PendingChange for Staged<R> {
    fn kind(&self) -> ChangeKind {
        self.kind
    }

    fn entity(&self) -> &'static str {
        R::NAME
    }

    async fn apply(&self, txn: &DatabaseTransaction) -> Result<(), DbErr> {
        let active = self.active.clone();
        match self.kind {
            ChangeKind::Insert => {
                active.insert(txn).await?;
            }
            ChangeKind::Update => {
                active.update(txn).await?;
            }
            ChangeKind::Delete => {
                let result = active.delete(txn).await?;
                if result.rows_affected == 0 {
                    return Err(DbErr::RecordNotFound(format!(
                        "{} to delete no longer exists",
                        R::NAME
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Ordered queue of staged changes shared by the stores of one unit of work.
#[derive(Default)]
pub(crate) struct ChangeSet {
    pending: Mutex<Vec<Box<dyn PendingChange>>>,
}

impl ChangeSet {
    pub(crate) fn push(&self, change: Box<dyn PendingChange>) {
        self.pending.lock().push(change);
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Apply every staged change in staging order inside one transaction.
    ///
    /// On success the queue is emptied and the number of applied changes is
    /// returned. On failure the transaction is rolled back and the changes
    /// stay queued.
    pub(crate) async fn commit(&self, db: &DatabaseConnection) -> Result<usize, DbErr> {
        let batch = std::mem::take(&mut *self.pending.lock());
        if batch.is_empty() {
            return Ok(0);
        }

        match Self::apply_all(&batch, db).await {
            Ok(()) => Ok(batch.len()),
            Err(e) => {
                self.restore(batch);
                Err(e)
            }
        }
    }

    async fn apply_all(batch: &[Box<dyn PendingChange>], db: &DatabaseConnection) -> Result<(), DbErr> {
        let txn = db.begin().await?;

        for (position, change) in batch.iter().enumerate() {
            if let Err(e) = change.apply(&txn).await {
                tracing::warn!(
                    position,
                    entity = change.entity(),
                    kind = ?change.kind(),
                    "Staged change rejected: {}",
                    e
                );
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                return Err(e);
            }
        }

        txn.commit().await
    }

    /// Put a failed batch back in front of anything staged since.
    fn restore(&self, batch: Vec<Box<dyn PendingChange>>) {
        let mut pending = self.pending.lock();
        let newer = std::mem::replace(&mut *pending, batch);
        pending.extend(newer);
    }
}
