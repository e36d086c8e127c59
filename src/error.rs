//! Application error types.

use thiserror::Error;

/// Application-level errors for bookgraph.
#[derive(Error, Debug)]
pub enum AppError {
    // Store errors
    #[error("Graph store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Cypher query error: {message}")]
    Query { message: String, query: String },

    // Domain errors
    #[error("{label} not found: {id}")]
    NotFound { label: &'static str, id: String },

    #[error("{label} already exists: {id}")]
    AlreadyExists { label: &'static str, id: String },

    #[error("{label} identifier {id} was allocated concurrently by another writer")]
    RaceCondition { label: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code surfaced to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AppError::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            AppError::Query { .. } => "QUERY_ERROR",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::AlreadyExists { .. } => "ALREADY_EXISTS",
            AppError::RaceCondition { .. } => "RACE_CONDITION",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether retrying the same statement could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::StoreUnavailable(_))
    }
}
