//! Service layer - back-office operations.
//!
//! Every operation opens its own unit of work, stages its changes and saves
//! once.

mod category_service;
mod company_service;
mod container;
mod product_service;
pub mod roles;
mod user_admin_service;

pub use category_service::{CategoryManager, CategoryService};
pub use company_service::{CompanyManager, CompanyService};
pub use container::Services;
pub use product_service::{ProductManager, ProductService};
pub use roles::{RoleChange, RoleChangeOutcome};
pub use user_admin_service::{UserAdminManager, UserAdminService};

#[cfg(any(test, feature = "test-utils"))]
pub use category_service::MockCategoryService;
#[cfg(any(test, feature = "test-utils"))]
pub use company_service::MockCompanyService;
#[cfg(any(test, feature = "test-utils"))]
pub use product_service::MockProductService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_admin_service::MockUserAdminService;
