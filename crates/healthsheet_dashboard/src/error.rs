//! Custom error types for the dashboard core.

use thiserror::Error;

/// Dashboard errors.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("store error: {0}")]
    Store(#[from] healthsheet_client::SheetError),

    #[error("estimation error: {0}")]
    Estimation(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;
