//! Ledger services: the store operations behind the HTTP surface.
//!
//! Every function takes the database handle explicitly, so callers may pass a
//! connection or an open transaction.

pub mod categories;
pub mod expenses;
pub mod income;
pub mod maintenance;
pub mod rules;
pub mod seed;

use compute::ComputeError;
use sea_orm::DbErr;
use thiserror::Error;

/// Errors raised by ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// No income row has the requested id
    #[error("Ingreso no encontrado")]
    IncomeNotFound,

    /// A referenced category does not exist
    #[error("Categoría no encontrada: {0}")]
    CategoryNotFound(i32),

    /// Error from the database operations
    #[error("{0}")]
    Database(#[from] DbErr),

    /// Error from the compute module
    #[error("{0}")]
    Compute(#[from] ComputeError),
}

/// Type alias for Result with LedgerError
pub type Result<T> = std::result::Result<T, LedgerError>;
