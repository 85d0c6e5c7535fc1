//! Service container - one handle to every back-office service.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    CategoryManager, CategoryService, CompanyManager, CompanyService, ProductManager,
    ProductService, UserAdminManager, UserAdminService,
};

/// Back-office services behind their traits
#[derive(Clone)]
pub struct Services {
    categories: Arc<dyn CategoryService>,
    companies: Arc<dyn CompanyService>,
    products: Arc<dyn ProductService>,
    users: Arc<dyn UserAdminService>,
}

impl Services {
    pub fn new(
        categories: Arc<dyn CategoryService>,
        companies: Arc<dyn CompanyService>,
        products: Arc<dyn ProductService>,
        users: Arc<dyn UserAdminService>,
    ) -> Self {
        Self {
            categories,
            companies,
            products,
            users,
        }
    }

    /// Create every service over one connection pool
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(CategoryManager::new(db.clone())),
            Arc::new(CompanyManager::new(db.clone())),
            Arc::new(ProductManager::new(db.clone())),
            Arc::new(UserAdminManager::new(db)),
        )
    }

    pub fn categories(&self) -> Arc<dyn CategoryService> {
        self.categories.clone()
    }

    pub fn companies(&self) -> Arc<dyn CompanyService> {
        self.companies.clone()
    }

    pub fn products(&self) -> Arc<dyn ProductService> {
        self.products.clone()
    }

    pub fn users(&self) -> Arc<dyn UserAdminService> {
        self.users.clone()
    }
}
