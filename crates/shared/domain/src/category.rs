//! Catalog category.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::constants::{
    FORM_LEVEL_FIELD, MSG_NAME_MATCHES_DISPLAY_ORDER, MSG_RESERVED_CATEGORY_NAME,
    RESERVED_CATEGORY_NAME,
};
use crate::error::DomainResult;

/// Product category shown in the storefront menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Category {
    /// Zero until the category is persisted
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub display_order: i32,
}

impl Category {
    /// Create a category that has not been persisted yet
    pub fn new(name: impl Into<String>, display_order: i32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            display_order,
        }
    }

    /// Whether this category still needs an insert
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Check field constraints and the naming rules.
    ///
    /// The name may not spell out the display order, and "test" is reserved
    /// in any casing.
    pub fn ensure_valid(&self) -> DomainResult<()> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if self.name == self.display_order.to_string() {
            errors.add("name", rule_error("display_order_match", MSG_NAME_MATCHES_DISPLAY_ORDER));
        }
        if self.name.to_lowercase() == RESERVED_CATEGORY_NAME {
            errors.add(FORM_LEVEL_FIELD, rule_error("reserved_name", MSG_RESERVED_CATEGORY_NAME));
        }

        if errors.field_errors().is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn field_errors(category: &Category) -> Vec<(String, String)> {
        match category.ensure_valid() {
            Err(DomainError::InvalidFields(fields)) => fields
                .into_iter()
                .map(|f| (f.field, f.message))
                .collect(),
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn test_regular_category_is_valid() {
        assert!(Category::new("Action", 1).ensure_valid().is_ok());
    }

    #[test]
    fn test_name_matching_display_order_is_rejected() {
        let errors = field_errors(&Category::new("5", 5));
        assert_eq!(
            errors,
            vec![("name".to_string(), MSG_NAME_MATCHES_DISPLAY_ORDER.to_string())]
        );
    }

    #[test]
    fn test_numeric_name_with_other_display_order_is_valid() {
        assert!(Category::new("5", 6).ensure_valid().is_ok());
    }

    #[test]
    fn test_reserved_name_is_rejected_in_any_casing() {
        for name in ["test", "Test", "TEST"] {
            let errors = field_errors(&Category::new(name, 1));
            assert_eq!(errors[0].0, FORM_LEVEL_FIELD);
            assert_eq!(errors[0].1, MSG_RESERVED_CATEGORY_NAME);
        }
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let errors = field_errors(&Category::new("", 1));
        assert_eq!(errors, vec![("name".to_string(), "Name is required".to_string())]);
    }
}
