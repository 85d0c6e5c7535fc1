//! Product service - catalog products.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection};

use common::{AppError, AppResult, OperationResult, OptionExt};
use domain::Product;

use crate::repository::entities::{category, product};
use crate::repository::{ProductInclude, Tracking};
use crate::unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    /// List all products with their category
    async fn list(&self) -> AppResult<Vec<Product>>;

    /// Get product by ID with its category
    async fn get(&self, id: i32) -> AppResult<Product>;

    /// Validate, then insert when the ID is zero or replace otherwise
    async fn upsert(&self, product: Product) -> AppResult<()>;

    /// Delete product by ID; a missing product is reported, not raised
    async fn delete(&self, id: i32) -> AppResult<OperationResult>;
}

/// Concrete implementation of ProductService.
pub struct ProductManager {
    db: DatabaseConnection,
}

impl ProductManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn list(&self) -> AppResult<Vec<Product>> {
        let uow = Persistence::new(self.db.clone());
        uow.products().get_all(None, &[ProductInclude::Category]).await
    }

    async fn get(&self, id: i32) -> AppResult<Product> {
        let uow = Persistence::new(self.db.clone());
        uow.products()
            .get(product::Column::Id.eq(id), &[ProductInclude::Category], Tracking::Detached)
            .await?
            .ok_or_not_found()
    }

    async fn upsert(&self, product: Product) -> AppResult<()> {
        product.ensure_valid()?;

        let uow = Persistence::new(self.db.clone());
        let category_exists = uow
            .categories()
            .get(category::Column::Id.eq(product.category_id), &[], Tracking::Detached)
            .await?
            .is_some();
        if !category_exists {
            return Err(AppError::validation(format!(
                "Category {} does not exist",
                product.category_id
            )));
        }

        if product.is_new() {
            uow.products().add(product);
        } else {
            uow.products()
                .get(product::Column::Id.eq(product.id), &[], Tracking::Detached)
                .await?
                .ok_or_not_found()?;
            uow.products().update(product);
        }
        uow.save().await?;
        tracing::info!("Product saved successfully");
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<OperationResult> {
        let uow = Persistence::new(self.db.clone());
        let Some(existing) = uow
            .products()
            .get(product::Column::Id.eq(id), &[], Tracking::Tracked)
            .await?
        else {
            return Ok(OperationResult::failure("Error while deleting"));
        };

        uow.products().remove(&existing);
        uow.save().await?;
        tracing::info!(id, "Product deleted");
        Ok(OperationResult::success("Delete Successful"))
    }
}
