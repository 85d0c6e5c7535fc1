//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Role for individual storefront customers
pub const ROLE_CUSTOMER: &str = "Customer";

/// Role for users who buy on behalf of a company
pub const ROLE_COMPANY: &str = "Company";

/// Administrator role with back-office access
pub const ROLE_ADMIN: &str = "Admin";

/// Staff role
pub const ROLE_EMPLOYEE: &str = "Employee";

// =============================================================================
// Catalog validation
// =============================================================================

/// Category names that are reserved, compared case-insensitively
pub const RESERVED_CATEGORY_NAME: &str = "test";

/// Error message when a category name equals its display order
pub const MSG_NAME_MATCHES_DISPLAY_ORDER: &str = "The Display order cannot exactly match the name.";

/// Error message when a category uses the reserved name
pub const MSG_RESERVED_CATEGORY_NAME: &str = "Test is a invalid value.";

/// Key used for errors that do not belong to a single field
pub const FORM_LEVEL_FIELD: &str = "__all__";

// =============================================================================
// Accounts
// =============================================================================

/// How long a locked account stays locked, in months
pub const LOCKOUT_DURATION_MONTHS: u32 = 12 * 1000;
