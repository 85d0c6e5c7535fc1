//! Shared fixtures for integration tests.

#![allow(dead_code)]

use sea_orm::ColumnTrait;

use backoffice_service_lib::repository::entities::{category, company, role};
use backoffice_service_lib::repository::Tracking;
use backoffice_service_lib::{Database, Persistence, UnitOfWork};
use common::DatabaseConfig;
use domain::{ApplicationUser, Category, Company, Product, RoleMembership, UserRole};

/// Fresh in-memory database with schema and built-in roles.
///
/// A single pooled connection keeps the in-memory database alive for the
/// whole test.
pub async fn setup() -> Database {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        sql_logging: false,
    };
    let db = Database::connect(&config).await.expect("connect");
    db.ensure_schema().await.expect("schema");
    db.ensure_builtin_roles().await.expect("roles");
    db
}

pub async fn seed_category(db: &Database, name: &str, display_order: i32) -> Category {
    let uow = Persistence::new(db.get_connection());
    uow.categories().add(Category::new(name, display_order));
    uow.save().await.expect("save category");

    uow.categories()
        .get(category::Column::Name.eq(name), &[], Tracking::Detached)
        .await
        .expect("query category")
        .expect("category stored")
}

pub async fn seed_company(db: &Database, name: &str) -> Company {
    let uow = Persistence::new(db.get_connection());
    uow.companies().add(Company::new(name));
    uow.save().await.expect("save company");

    uow.companies()
        .get(company::Column::Name.eq(name), &[], Tracking::Detached)
        .await
        .expect("query company")
        .expect("company stored")
}

/// Store a user holding `role`, affiliated with `company_id`.
pub async fn seed_user(
    db: &Database,
    email: &str,
    role: UserRole,
    company_id: Option<i32>,
) -> ApplicationUser {
    let uow = Persistence::new(db.get_connection());
    let role_row = uow
        .roles()
        .get(role::Column::Name.eq(role.as_str()), &[], Tracking::Detached)
        .await
        .expect("query role")
        .expect("built-in role");

    let mut user = ApplicationUser::new(email, "Test User");
    user.company_id = company_id;
    uow.users().add(user.clone());
    uow.memberships().add(RoleMembership::new(user.id.as_str(), role_row.id));
    uow.save().await.expect("save user");
    user
}

pub fn sample_product(title: &str, category_id: i32, price: f64) -> Product {
    Product {
        id: 0,
        title: title.to_string(),
        description: String::new(),
        isbn: format!("ISBN-{}", title),
        author: "Billy Spark".to_string(),
        list_price: price,
        price,
        price50: price,
        price100: price,
        category_id,
        image_url: None,
        category: None,
    }
}
