//! Roles a back-office user can hold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_COMPANY, ROLE_CUSTOMER, ROLE_EMPLOYEE};
use crate::error::DomainError;

/// User roles enumeration
///
/// A user holds exactly one role at a time. `Company` is the only role that
/// carries a company affiliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Customer,
    Company,
    Admin,
    Employee,
}

impl UserRole {
    /// Every built-in role, in provisioning order
    pub const ALL: [UserRole; 4] = [
        UserRole::Customer,
        UserRole::Employee,
        UserRole::Admin,
        UserRole::Company,
    ];

    /// Stored role name
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => ROLE_CUSTOMER,
            UserRole::Company => ROLE_COMPANY,
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Employee => ROLE_EMPLOYEE,
        }
    }

    /// Whether users in this role must reference a company
    pub fn requires_company(&self) -> bool {
        matches!(self, UserRole::Company)
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_CUSTOMER => Ok(UserRole::Customer),
            ROLE_COMPANY => Ok(UserRole::Company),
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_EMPLOYEE => Ok(UserRole::Employee),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_round_trip() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_names_are_case_sensitive() {
        assert!(matches!(
            "company".parse::<UserRole>(),
            Err(DomainError::UnknownRole(name)) if name == "company"
        ));
    }

    #[test]
    fn test_only_company_requires_company() {
        assert!(UserRole::Company.requires_company());
        assert!(!UserRole::Customer.requires_company());
        assert!(!UserRole::Admin.requires_company());
        assert!(!UserRole::Employee.requires_company());
    }
}
