//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the catalog (categories, products), companies, back-office users and the
//! roles they hold.

pub mod category;
pub mod company;
pub mod constants;
pub mod error;
pub mod product;
pub mod role;
pub mod user;

pub use category::Category;
pub use company::Company;
pub use constants::*;
pub use error::{DomainError, DomainResult, FieldError};
pub use product::Product;
pub use role::UserRole;
pub use user::{ApplicationUser, IdentityRole, RoleMembership};
