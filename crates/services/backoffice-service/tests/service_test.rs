//! Integration tests for the back-office services.

mod support;

use chrono::Utc;

use backoffice_service_lib::service::{
    CategoryManager, CategoryService, CompanyManager, CompanyService, ProductManager,
    ProductService, UserAdminManager, UserAdminService,
};
use common::AppError;
use domain::{Category, Company, UserRole, MSG_NAME_MATCHES_DISPLAY_ORDER, MSG_RESERVED_CATEGORY_NAME};

use support::{sample_product, seed_category, seed_company, seed_user, setup};

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_category_rules_reject_before_staging() {
    let db = setup().await;
    let categories = CategoryManager::new(db.get_connection());

    let err = categories.create(Category::new("5", 5)).await.unwrap_err();
    let messages: Vec<&str> = err.field_errors().iter().map(|f| f.message.as_str()).collect();
    assert!(messages.contains(&MSG_NAME_MATCHES_DISPLAY_ORDER));

    let err = categories.create(Category::new("Test", 1)).await.unwrap_err();
    let messages: Vec<&str> = err.field_errors().iter().map(|f| f.message.as_str()).collect();
    assert!(messages.contains(&MSG_RESERVED_CATEGORY_NAME));

    assert!(categories.list().await.unwrap().is_empty());

    categories.create(Category::new("Action", 1)).await.unwrap();
    let stored = categories.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Action");
}

#[tokio::test]
async fn test_category_get_update_delete() {
    let db = setup().await;
    let categories = CategoryManager::new(db.get_connection());
    let action = seed_category(&db, "Action", 1).await;

    assert!(matches!(categories.get(0).await, Err(AppError::NotFound)));

    let mut renamed = categories.get(action.id).await.unwrap();
    renamed.name = "Adventure".to_string();
    categories.update(renamed).await.unwrap();
    assert_eq!(categories.get(action.id).await.unwrap().name, "Adventure");

    categories.delete(action.id).await.unwrap();
    assert!(matches!(categories.get(action.id).await, Err(AppError::NotFound)));
    assert!(matches!(categories.delete(action.id).await, Err(AppError::NotFound)));
}

// =============================================================================
// Companies
// =============================================================================

#[tokio::test]
async fn test_delete_missing_company_reports_failure() {
    let db = setup().await;
    let companies = CompanyManager::new(db.get_connection());
    seed_company(&db, "Acme Books").await;

    let result = companies.delete(404).await.unwrap();
    assert!(!result.success);
    assert_eq!(result.message, "Error while deleting");
    assert_eq!(companies.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_company_upsert_and_delete() {
    let db = setup().await;
    let companies = CompanyManager::new(db.get_connection());

    companies.upsert(Company::new("Acme Books")).await.unwrap();
    let mut acme = companies.list().await.unwrap().remove(0);
    acme.phone_number = Some("555-0100".to_string());
    companies.upsert(acme.clone()).await.unwrap();

    let stored = companies.get(acme.id).await.unwrap();
    assert_eq!(stored.phone_number.as_deref(), Some("555-0100"));

    let result = companies.delete(acme.id).await.unwrap();
    assert!(result.success);
    assert!(companies.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_company_without_name_is_rejected() {
    let db = setup().await;
    let companies = CompanyManager::new(db.get_connection());

    let err = companies.upsert(Company::default()).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidFields(_)));
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_product_price_bounds() {
    let db = setup().await;
    let products = ProductManager::new(db.get_connection());
    let scifi = seed_category(&db, "SciFi", 2).await;

    for price in [0.0, 1000.01] {
        let err = products
            .upsert(sample_product("Dark Skies", scifi.id, price))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidFields(_)), "price {} accepted", price);
    }
    assert!(products.list().await.unwrap().is_empty());

    products
        .upsert(sample_product("Dark Skies", scifi.id, 500.0))
        .await
        .unwrap();
    let listed = products.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].category.as_ref().map(|c| c.name.as_str()), Some("SciFi"));
}

#[tokio::test]
async fn test_product_needs_existing_category() {
    let db = setup().await;
    let products = ProductManager::new(db.get_connection());

    let err = products
        .upsert(sample_product("Dark Skies", 404, 90.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_product_get_and_delete() {
    let db = setup().await;
    let products = ProductManager::new(db.get_connection());
    let scifi = seed_category(&db, "SciFi", 2).await;
    products
        .upsert(sample_product("Dark Skies", scifi.id, 90.0))
        .await
        .unwrap();
    let id = products.list().await.unwrap()[0].id;

    let loaded = products.get(id).await.unwrap();
    assert_eq!(loaded.category.map(|c| c.id), Some(scifi.id));

    assert!(products.delete(id).await.unwrap().success);
    assert!(!products.delete(id).await.unwrap().success);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_lock_unlock_toggles() {
    let db = setup().await;
    let users = UserAdminManager::new(db.get_connection());
    let shopper = seed_user(&db, "shopper@mail.test", UserRole::Customer, None).await;

    let locked = users.lock_unlock(&shopper.id).await.unwrap();
    assert!(locked.success);
    assert!(users.get(&shopper.id).await.unwrap().is_locked_at(Utc::now()));

    let unlocked = users.lock_unlock(&shopper.id).await.unwrap();
    assert!(unlocked.success);
    assert!(!users.get(&shopper.id).await.unwrap().is_locked_at(Utc::now()));
}

#[tokio::test]
async fn test_lock_unlock_missing_user() {
    let db = setup().await;
    let users = UserAdminManager::new(db.get_connection());

    let result = users.lock_unlock("no-such-user").await.unwrap();
    assert!(!result.success);
    assert_eq!(result.message, "Error while Locking/Unlocking");
}

#[tokio::test]
async fn test_user_list_and_role_assignment() {
    let db = setup().await;
    let users = UserAdminManager::new(db.get_connection());
    let acme = seed_company(&db, "Acme Books").await;
    let shopper = seed_user(&db, "shopper@mail.test", UserRole::Customer, None).await;

    users
        .assign_role(&shopper.id, UserRole::Company, Some(acme.id))
        .await
        .unwrap();

    let listed = users.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].role, Some(UserRole::Company));
    assert_eq!(listed[0].company.as_ref().map(|c| c.name.as_str()), Some("Acme Books"));
    assert!(matches!(users.get("no-such-user").await, Err(AppError::NotFound)));
}

// =============================================================================
// Updates of missing records
// =============================================================================

#[tokio::test]
async fn test_updating_missing_records_reports_generic_failure() {
    let db = setup().await;
    let scifi = seed_category(&db, "SciFi", 2).await;

    let categories = CategoryManager::new(db.get_connection());
    let err = categories
        .update(Category {
            id: 999,
            ..Category::new("Drama", 4)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    assert_eq!(err.user_message(), "Operation failed");

    let companies = CompanyManager::new(db.get_connection());
    let err = companies
        .upsert(Company {
            id: 999,
            ..Company::new("Ghost Books")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    assert_eq!(err.user_message(), "Operation failed");

    let products = ProductManager::new(db.get_connection());
    let mut ghost = sample_product("Dark Skies", scifi.id, 90.0);
    ghost.id = 999;
    let err = products.upsert(ghost).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    assert_eq!(categories.list().await.unwrap(), vec![scifi]);
    assert!(companies.list().await.unwrap().is_empty());
    assert!(products.list().await.unwrap().is_empty());
}
