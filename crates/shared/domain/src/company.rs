//! Companies that buy through the back-office.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainResult;

/// Company account referenced by users in the Company role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Company {
    /// Zero until the company is persisted
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
}

impl Company {
    /// Create a company that has not been persisted yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether this company still needs an insert
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub fn ensure_valid(&self) -> DomainResult<()> {
        self.validate().map_err(Into::into)
    }
}
