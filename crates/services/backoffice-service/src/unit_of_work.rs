//! Unit of Work pattern implementation.
//!
//! One unit of work serves one logical operation:
//! - Hands out one [`Store`] per entity type, created on first use
//! - Collects every staged insert, update and delete in staging order
//! - Commits them in a single database transaction, or none of them

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use sea_orm::DatabaseConnection;

use common::{AppError, AppResult};
use domain::{ApplicationUser, Category, Company, IdentityRole, Product, RoleMembership};

use crate::repository::{ChangeSet, Record, Store};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Unit of Work trait for dependency injection.
///
/// Not meant to be shared between concurrent operations; create one per
/// operation and drop it after [`save`](UnitOfWork::save).
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get category store
    fn categories(&self) -> &Store<Category>;

    /// Get company store
    fn companies(&self) -> &Store<Company>;

    /// Get product store
    fn products(&self) -> &Store<Product>;

    /// Get user store
    fn users(&self) -> &Store<ApplicationUser>;

    /// Get role store
    fn roles(&self) -> &Store<IdentityRole>;

    /// Get role membership store
    fn memberships(&self) -> &Store<RoleMembership>;

    /// Check if any change is staged
    fn has_changes(&self) -> bool;

    /// Commit every staged change atomically.
    ///
    /// Returns the number of changes written. On failure nothing is
    /// committed and the staged changes are kept.
    async fn save(&self) -> AppResult<usize>;
}

/// Concrete implementation of UnitOfWork backed by a SeaORM connection
pub struct Persistence {
    db: DatabaseConnection,
    changes: Arc<ChangeSet>,
    categories: OnceCell<Store<Category>>,
    companies: OnceCell<Store<Company>>,
    products: OnceCell<Store<Product>>,
    users: OnceCell<Store<ApplicationUser>>,
    roles: OnceCell<Store<IdentityRole>>,
    memberships: OnceCell<Store<RoleMembership>>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            changes: Arc::new(ChangeSet::default()),
            categories: OnceCell::new(),
            companies: OnceCell::new(),
            products: OnceCell::new(),
            users: OnceCell::new(),
            roles: OnceCell::new(),
            memberships: OnceCell::new(),
        }
    }

    fn store<'s, R: Record>(&self, cell: &'s OnceCell<Store<R>>) -> &'s Store<R> {
        cell.get_or_init(|| Store::new(self.db.clone(), Arc::clone(&self.changes)))
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn categories(&self) -> &Store<Category> {
        self.store(&self.categories)
    }

    fn companies(&self) -> &Store<Company> {
        self.store(&self.companies)
    }

    fn products(&self) -> &Store<Product> {
        self.store(&self.products)
    }

    fn users(&self) -> &Store<ApplicationUser> {
        self.store(&self.users)
    }

    fn roles(&self) -> &Store<IdentityRole> {
        self.store(&self.roles)
    }

    fn memberships(&self) -> &Store<RoleMembership> {
        self.store(&self.memberships)
    }

    fn has_changes(&self) -> bool {
        self.changes.len() > 0
    }

    async fn save(&self) -> AppResult<usize> {
        let staged = self.changes.len();

        match self.changes.commit(&self.db).await {
            Ok(applied) => {
                tracing::debug!(applied, "Unit of work committed");
                Ok(applied)
            }
            Err(e) => {
                tracing::error!(staged, "Unit of work rolled back: {}", e);
                Err(AppError::from(e))
            }
        }
    }
}
