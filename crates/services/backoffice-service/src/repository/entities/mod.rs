//! SeaORM entities, one module per table.

pub mod category;
pub mod company;
pub mod product;
pub mod role;
pub mod user;
pub mod user_role;
