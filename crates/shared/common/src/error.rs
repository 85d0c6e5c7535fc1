//! Unified error handling for the back-office core.
//!
//! Every store, unit of work and service operation returns [`AppResult`].
//! Callers decide how to present an error; [`AppError::user_message`] hides
//! storage details and [`AppError::is_fatal`] flags states that need an
//! operator.

use domain::{DomainError, FieldError};
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Validation failed")]
    InvalidFields(Vec<FieldError>),

    // Storage
    #[cfg(feature = "database")]
    #[error("Persistence error: {0}")]
    Persistence(#[from] sea_orm::DbErr),

    /// Stored state moved on since the request was prepared
    #[error("Concurrent modification: {0}")]
    Concurrency(String),

    /// Role membership and user record disagree; needs operator attention
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) | AppError::InvalidFields(_) => "VALIDATION_ERROR",
            #[cfg(feature = "database")]
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::Concurrency(_) => "CONCURRENCY_ERROR",
            AppError::InconsistentState(_) => "INCONSISTENT_STATE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller can recover by correcting input and retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::NotFound
                | AppError::Validation(_)
                | AppError::InvalidFields(_)
                | AppError::Concurrency(_)
        )
    }

    /// Whether the operation left storage in a state an operator must repair
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::InconsistentState(_))
    }

    /// Field-level messages, when the error carries any
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::InvalidFields(fields) => fields,
            _ => &[],
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidFields(fields) => fields
                .iter()
                .map(|f| f.message.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            AppError::Concurrency(msg) => msg.clone(),

            // Missing records report a generic failure
            AppError::NotFound => "Operation failed".to_string(),

            // Hide details for internal errors
            #[cfg(feature = "database")]
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::InconsistentState(msg) => {
                tracing::error!("Inconsistent state requires operator attention: {}", msg);
                "Operation failed".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidFields(fields) => AppError::InvalidFields(fields),
            DomainError::UnknownRole(name) => AppError::Validation(format!("Unknown role: {}", name)),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn concurrency(msg: impl Into<String>) -> Self {
        AppError::Concurrency(msg.into())
    }

    pub fn inconsistent(msg: impl Into<String>) -> Self {
        AppError::InconsistentState(msg.into())
    }
}
