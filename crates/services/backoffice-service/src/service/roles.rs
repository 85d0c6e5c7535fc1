//! Role changes that keep a user's company affiliation consistent.
//!
//! A user's `company_id` is set if and only if the user holds the Company
//! role. The user update and the membership swap are staged on the same unit
//! of work and committed together.

use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Serialize};

use common::{AppError, AppResult};
use domain::{ApplicationUser, IdentityRole, RoleMembership, UserRole};

use crate::repository::entities::{company, role, user, user_role};
use crate::repository::{MembershipInclude, Tracking};
use crate::unit_of_work::UnitOfWork;

/// Request to move a user from one role to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleChange {
    pub user_id: String,
    /// Role the caller believes the user currently holds
    pub old_role: UserRole,
    pub new_role: UserRole,
    /// Only read when `new_role` is Company
    pub company_id: Option<i32>,
}

/// What a role change did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoleChangeOutcome {
    /// Requested role equals the current one; nothing was touched
    Unchanged,
    Changed { from: UserRole, to: UserRole },
}

/// Move a user to a new role, updating the company affiliation to match.
///
/// Staging order: user record, removal of the old membership, insertion of
/// the new one. All three are committed by one `save`.
pub async fn change_role<U>(uow: &U, change: RoleChange) -> AppResult<RoleChangeOutcome>
where
    U: UnitOfWork + ?Sized,
{
    if change.new_role == change.old_role {
        tracing::debug!(user_id = %change.user_id, role = %change.new_role, "Role unchanged");
        return Ok(RoleChangeOutcome::Unchanged);
    }

    let mut account = uow
        .users()
        .get(user::Column::Id.eq(change.user_id.as_str()), &[], Tracking::Tracked)
        .await?
        .ok_or(AppError::NotFound)?;

    let membership = current_membership(uow, &change.user_id).await?;
    let stored_role = membership.user_role();
    if stored_role != Some(change.old_role) {
        return Err(AppError::concurrency(format!(
            "User role is {} but the request expected {}",
            stored_role.map(|r| r.to_string()).unwrap_or_else(|| "unknown".to_string()),
            change.old_role
        )));
    }

    let target = uow
        .roles()
        .get(role::Column::Name.eq(change.new_role.as_str()), &[], Tracking::Detached)
        .await?
        .ok_or_else(|| AppError::validation(format!("Role {} does not exist", change.new_role)))?;

    if change.new_role.requires_company() {
        let company_id = change
            .company_id
            .ok_or_else(|| AppError::validation("A company must be selected for the Company role"))?;
        let exists = uow
            .companies()
            .get(company::Column::Id.eq(company_id), &[], Tracking::Detached)
            .await?
            .is_some();
        if !exists {
            return Err(AppError::validation(format!("Company {} does not exist", company_id)));
        }
        account.company_id = Some(company_id);
    } else {
        account.company_id = None;
    }

    uow.users().update(account);
    uow.memberships().remove(&membership);
    uow.memberships().add(RoleMembership::new(change.user_id.as_str(), target.id));
    uow.save().await?;

    verify_membership(uow, &change.user_id, change.new_role).await?;

    tracing::info!(
        user_id = %change.user_id,
        from = %change.old_role,
        to = %change.new_role,
        "Role changed"
    );
    Ok(RoleChangeOutcome::Changed {
        from: change.old_role,
        to: change.new_role,
    })
}

/// Change a user's role, reading the current role from storage.
pub async fn assign_role<U>(
    uow: &U,
    user_id: &str,
    new_role: UserRole,
    company_id: Option<i32>,
) -> AppResult<RoleChangeOutcome>
where
    U: UnitOfWork + ?Sized,
{
    let membership = uow
        .memberships()
        .get(
            user_role::Column::UserId.eq(user_id),
            &[MembershipInclude::Role],
            Tracking::Detached,
        )
        .await?;

    let old_role = match membership {
        Some(membership) => membership.user_role().ok_or_else(|| {
            AppError::inconsistent(format!("user {} holds an unknown role", user_id))
        })?,
        None => {
            // Distinguish a missing user from a user without a role
            uow.users()
                .get(user::Column::Id.eq(user_id), &[], Tracking::Detached)
                .await?
                .ok_or(AppError::NotFound)?;
            return Err(AppError::inconsistent(format!("user {} has no role membership", user_id)));
        }
    };

    change_role(
        uow,
        RoleChange {
            user_id: user_id.to_string(),
            old_role,
            new_role,
            company_id,
        },
    )
    .await
}

/// Insert a row for every built-in role that is missing. Returns how many
/// roles were created.
///
/// Saves `uow`, so anything else staged on it is committed too; pass a fresh
/// unit of work.
pub async fn ensure_builtin_roles<U>(uow: &U) -> AppResult<usize>
where
    U: UnitOfWork + ?Sized,
{
    let existing = uow.roles().get_all(None, &[]).await?;

    let mut created = 0;
    for role in UserRole::ALL {
        if !existing.iter().any(|r| r.name == role.as_str()) {
            uow.roles().add(IdentityRole::new(role));
            created += 1;
        }
    }

    uow.save().await?;
    if created > 0 {
        tracing::info!(created, "Built-in roles provisioned");
    }
    Ok(created)
}

/// The user's membership row, tracked so it can be removed.
async fn current_membership<U>(uow: &U, user_id: &str) -> AppResult<RoleMembership>
where
    U: UnitOfWork + ?Sized,
{
    uow.memberships()
        .get(
            user_role::Column::UserId.eq(user_id),
            &[MembershipInclude::Role],
            Tracking::Tracked,
        )
        .await?
        .ok_or_else(|| AppError::inconsistent(format!("user {} has no role membership", user_id)))
}

/// Re-read committed state and check the role/company invariant.
async fn verify_membership<U>(uow: &U, user_id: &str, expected: UserRole) -> AppResult<()>
where
    U: UnitOfWork + ?Sized,
{
    let memberships = uow
        .memberships()
        .get_all(
            Some(Condition::all().add(user_role::Column::UserId.eq(user_id))),
            &[MembershipInclude::Role],
        )
        .await?;
    let account: Option<ApplicationUser> = uow
        .users()
        .get(user::Column::Id.eq(user_id), &[], Tracking::Detached)
        .await?;

    let holds_expected = memberships.len() == 1 && memberships[0].user_role() == Some(expected);
    let company_consistent = account
        .as_ref()
        .is_some_and(|a| a.company_matches_role(expected));

    if holds_expected && company_consistent {
        return Ok(());
    }

    tracing::error!(
        user_id,
        memberships = memberships.len(),
        expected = %expected,
        "Role membership and user record are out of sync"
    );
    Err(AppError::inconsistent(format!(
        "user {} should hold only {} with a matching company affiliation",
        user_id, expected
    )))
}
