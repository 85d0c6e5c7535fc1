//! Company service - company accounts used by the Company role.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection};

use common::{AppResult, OperationResult, OptionExt};
use domain::Company;

use crate::repository::entities::company;
use crate::repository::Tracking;
use crate::unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Company service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CompanyService: Send + Sync {
    /// List all companies
    async fn list(&self) -> AppResult<Vec<Company>>;

    /// Get company by ID
    async fn get(&self, id: i32) -> AppResult<Company>;

    /// Insert when the ID is zero, otherwise replace the existing company
    async fn upsert(&self, company: Company) -> AppResult<()>;

    /// Delete company by ID; a missing company is reported, not raised
    async fn delete(&self, id: i32) -> AppResult<OperationResult>;
}

/// Concrete implementation of CompanyService.
pub struct CompanyManager {
    db: DatabaseConnection,
}

impl CompanyManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompanyService for CompanyManager {
    async fn list(&self) -> AppResult<Vec<Company>> {
        let uow = Persistence::new(self.db.clone());
        uow.companies().get_all(None, &[]).await
    }

    async fn get(&self, id: i32) -> AppResult<Company> {
        let uow = Persistence::new(self.db.clone());
        uow.companies()
            .get(company::Column::Id.eq(id), &[], Tracking::Detached)
            .await?
            .ok_or_not_found()
    }

    async fn upsert(&self, company: Company) -> AppResult<()> {
        company.ensure_valid()?;

        let uow = Persistence::new(self.db.clone());
        if company.is_new() {
            uow.companies().add(company);
        } else {
            uow.companies()
                .get(company::Column::Id.eq(company.id), &[], Tracking::Detached)
                .await?
                .ok_or_not_found()?;
            uow.companies().update(company);
        }
        uow.save().await?;
        tracing::info!("Company saved successfully");
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<OperationResult> {
        let uow = Persistence::new(self.db.clone());
        let Some(existing) = uow
            .companies()
            .get(company::Column::Id.eq(id), &[], Tracking::Tracked)
            .await?
        else {
            tracing::debug!(id, "Company to delete not found");
            return Ok(OperationResult::failure("Error while deleting"));
        };

        uow.companies().remove(&existing);
        uow.save().await?;
        tracing::info!(id, "Company deleted");
        Ok(OperationResult::success("Delete Successful"))
    }
}
