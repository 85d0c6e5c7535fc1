//! User administration - listing, role assignment and account locking.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection};

use common::{AppResult, OperationResult, OptionExt};
use domain::{ApplicationUser, UserRole};

use crate::repository::entities::user;
use crate::repository::{Tracking, UserInclude};
use crate::unit_of_work::{Persistence, UnitOfWork};

use super::roles::{self, RoleChange, RoleChangeOutcome};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const USER_INCLUDES: [UserInclude; 2] = [UserInclude::Company, UserInclude::Role];

/// User administration service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserAdminService: Send + Sync {
    /// List every user with company and role loaded
    async fn list(&self) -> AppResult<Vec<ApplicationUser>>;

    /// Get user by ID with company and role loaded
    async fn get(&self, id: &str) -> AppResult<ApplicationUser>;

    /// Move a user between roles, checking the caller's view of the old role
    async fn change_role(&self, change: RoleChange) -> AppResult<RoleChangeOutcome>;

    /// Move a user to a role regardless of the current one
    async fn assign_role(
        &self,
        user_id: &str,
        role: UserRole,
        company_id: Option<i32>,
    ) -> AppResult<RoleChangeOutcome>;

    /// Lock an unlocked account, unlock a locked one
    async fn lock_unlock(&self, id: &str) -> AppResult<OperationResult>;
}

/// Concrete implementation of UserAdminService.
pub struct UserAdminManager {
    db: DatabaseConnection,
}

impl UserAdminManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserAdminService for UserAdminManager {
    async fn list(&self) -> AppResult<Vec<ApplicationUser>> {
        let uow = Persistence::new(self.db.clone());
        uow.users().get_all(None, &USER_INCLUDES).await
    }

    async fn get(&self, id: &str) -> AppResult<ApplicationUser> {
        let uow = Persistence::new(self.db.clone());
        uow.users()
            .get(user::Column::Id.eq(id), &USER_INCLUDES, Tracking::Detached)
            .await?
            .ok_or_not_found()
    }

    async fn change_role(&self, change: RoleChange) -> AppResult<RoleChangeOutcome> {
        let uow = Persistence::new(self.db.clone());
        roles::change_role(&uow, change).await
    }

    async fn assign_role(
        &self,
        user_id: &str,
        role: UserRole,
        company_id: Option<i32>,
    ) -> AppResult<RoleChangeOutcome> {
        let uow = Persistence::new(self.db.clone());
        roles::assign_role(&uow, user_id, role, company_id).await
    }

    async fn lock_unlock(&self, id: &str) -> AppResult<OperationResult> {
        let uow = Persistence::new(self.db.clone());
        let Some(mut account) = uow
            .users()
            .get(user::Column::Id.eq(id), &[], Tracking::Detached)
            .await?
        else {
            return Ok(OperationResult::failure("Error while Locking/Unlocking"));
        };

        let locked = account.toggle_lock(Utc::now())?;
        uow.users().update(account);
        uow.save().await?;

        tracing::info!(user_id = id, locked, "Account lock toggled");
        let message = if locked { "Lock Successful" } else { "Unlock Successful" };
        Ok(OperationResult::success(message))
    }
}
