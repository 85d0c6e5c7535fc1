//! Back-office user and role membership entities.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::company::Company;
use crate::constants::LOCKOUT_DURATION_MONTHS;
use crate::error::{DomainError, DomainResult};
use crate::role::UserRole;

/// Identity record of a back-office user.
///
/// `company_id` is set if and only if the user's role is `Company`.
/// The role itself lives in the role membership relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUser {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub name: String,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
    pub company_id: Option<i32>,
    /// Account is locked while this lies in the future
    pub lockout_end: Option<DateTime<Utc>>,
    /// Loaded only when the company include is requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    /// Loaded only when the role include is requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl ApplicationUser {
    /// Create a user with a fresh identity and no company
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            id: Uuid::new_v4().to_string(),
            user_name: email.clone(),
            email,
            name: name.into(),
            street_address: None,
            city: None,
            state: None,
            postal_code: None,
            phone_number: None,
            company_id: None,
            lockout_end: None,
            company: None,
            role: None,
        }
    }

    /// Check if the account is locked at `now`
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.lockout_end.is_some_and(|end| end > now)
    }

    /// Unlock a locked account, lock an unlocked one.
    ///
    /// Unlocking moves the lockout end to `now`; locking pushes it a
    /// thousand years out. Returns whether the account is now locked.
    pub fn toggle_lock(&mut self, now: DateTime<Utc>) -> DomainResult<bool> {
        if self.is_locked_at(now) {
            self.lockout_end = Some(now);
            Ok(false)
        } else {
            let until = now
                .checked_add_months(Months::new(LOCKOUT_DURATION_MONTHS))
                .ok_or_else(|| DomainError::internal("lockout end out of range"))?;
            self.lockout_end = Some(until);
            Ok(true)
        }
    }

    /// Check the role/company invariant against a role
    pub fn company_matches_role(&self, role: UserRole) -> bool {
        self.company_id.is_some() == role.requires_company()
    }
}

/// Role row in the identity store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRole {
    pub id: String,
    pub name: String,
}

impl IdentityRole {
    /// Create a role row with a fresh identity
    pub fn new(role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: role.as_str().to_string(),
        }
    }
}

/// The single role a user currently holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMembership {
    pub user_id: String,
    pub role_id: String,
    /// Loaded only when the role include is requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<IdentityRole>,
}

impl RoleMembership {
    pub fn new(user_id: impl Into<String>, role_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role_id: role_id.into(),
            role: None,
        }
    }

    /// Parsed role name, when the role include was loaded
    pub fn user_role(&self) -> Option<UserRole> {
        self.role.as_ref().and_then(|r| r.name.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_user_has_identity_and_no_company() {
        let user = ApplicationUser::new("jane@example.com", "Jane");
        assert!(Uuid::parse_str(&user.id).is_ok());
        assert_eq!(user.user_name, "jane@example.com");
        assert!(user.company_id.is_none());
        assert!(user.company_matches_role(UserRole::Customer));
        assert!(!user.company_matches_role(UserRole::Company));
    }

    #[test]
    fn test_toggle_lock_locks_unlocked_user() {
        let now = Utc::now();
        let mut user = ApplicationUser::new("jane@example.com", "Jane");

        assert!(user.toggle_lock(now).unwrap());
        assert!(user.is_locked_at(now));
        assert!(user.lockout_end.unwrap() > now + Duration::days(365 * 999));
    }

    #[test]
    fn test_toggle_lock_unlocks_locked_user() {
        let now = Utc::now();
        let mut user = ApplicationUser::new("jane@example.com", "Jane");
        user.lockout_end = Some(now + Duration::days(1));

        assert!(!user.toggle_lock(now).unwrap());
        assert_eq!(user.lockout_end, Some(now));
        assert!(!user.is_locked_at(now));
    }

    #[test]
    fn test_expired_lockout_counts_as_unlocked() {
        let now = Utc::now();
        let mut user = ApplicationUser::new("jane@example.com", "Jane");
        user.lockout_end = Some(now - Duration::days(1));

        assert!(user.toggle_lock(now).unwrap());
    }

    #[test]
    fn test_membership_role_parses_loaded_name() {
        let role = IdentityRole::new(UserRole::Company);
        let mut membership = RoleMembership::new("u1", role.id.clone());
        assert_eq!(membership.user_role(), None);

        membership.role = Some(role);
        assert_eq!(membership.user_role(), Some(UserRole::Company));
    }
}
