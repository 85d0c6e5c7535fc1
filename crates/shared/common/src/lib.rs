//! Common utilities shared across the back-office crates.
//!
//! This crate provides:
//! - Unified error handling
//! - Configuration structures
//! - Operation results reported to callers

pub mod config;
pub mod error;
pub mod response;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use response::OperationResult;
