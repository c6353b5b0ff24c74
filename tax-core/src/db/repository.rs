use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DeductionConfig, DeductionKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Store for the two adjustable deduction parameters.
///
/// Callers validate amounts before calling [`set_deduction`]; the store only
/// persists them.
///
/// [`set_deduction`]: DeductionRepository::set_deduction
#[async_trait]
pub trait DeductionRepository: Send + Sync {
    /// Snapshot of the current values.
    async fn current_deductions(&self) -> Result<DeductionConfig, RepositoryError>;

    /// Replaces one value, leaving the other as it was, and returns the
    /// resulting snapshot.
    async fn set_deduction(
        &self,
        kind: DeductionKind,
        amount: f64,
    ) -> Result<DeductionConfig, RepositoryError>;
}
