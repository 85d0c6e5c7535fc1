//! Category service - catalog category maintenance.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection};

use common::{AppError, AppResult, OptionExt};
use domain::Category;

use crate::repository::entities::category;
use crate::repository::Tracking;
use crate::unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Category service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// List all categories
    async fn list(&self) -> AppResult<Vec<Category>>;

    /// Get category by ID
    async fn get(&self, id: i32) -> AppResult<Category>;

    /// Validate and insert a new category
    async fn create(&self, category: Category) -> AppResult<()>;

    /// Validate and replace an existing category
    async fn update(&self, category: Category) -> AppResult<()>;

    /// Delete category by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CategoryService.
pub struct CategoryManager {
    db: DatabaseConnection,
}

impl CategoryManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryService for CategoryManager {
    async fn list(&self) -> AppResult<Vec<Category>> {
        let uow = Persistence::new(self.db.clone());
        uow.categories().get_all(None, &[]).await
    }

    async fn get(&self, id: i32) -> AppResult<Category> {
        if id == 0 {
            return Err(AppError::NotFound);
        }
        let uow = Persistence::new(self.db.clone());
        uow.categories()
            .get(category::Column::Id.eq(id), &[], Tracking::Detached)
            .await?
            .ok_or_not_found()
    }

    async fn create(&self, category: Category) -> AppResult<()> {
        category.ensure_valid()?;

        let uow = Persistence::new(self.db.clone());
        uow.categories().add(category);
        uow.save().await?;
        tracing::info!("Category created successfully");
        Ok(())
    }

    async fn update(&self, category: Category) -> AppResult<()> {
        category.ensure_valid()?;
        if category.is_new() {
            return Err(AppError::NotFound);
        }

        let uow = Persistence::new(self.db.clone());
        let id = category.id;
        uow.categories()
            .get(category::Column::Id.eq(id), &[], Tracking::Detached)
            .await?
            .ok_or_not_found()?;

        uow.categories().update(category);
        uow.save().await?;
        tracing::info!(id, "Category updated successfully");
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let uow = Persistence::new(self.db.clone());
        let existing = uow
            .categories()
            .get(category::Column::Id.eq(id), &[], Tracking::Tracked)
            .await?
            .ok_or_not_found()?;

        uow.categories().remove(&existing);
        uow.save().await?;
        tracing::info!(id, "Category deleted successfully");
        Ok(())
    }
}
