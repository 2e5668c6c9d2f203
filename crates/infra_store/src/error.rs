//! Store error types

use thiserror::Error;

use core_kernel::{CoreError, PoolId};
use domain_pool::PoolError;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// No pool with this id
    #[error("Pool not found: {0}")]
    PoolNotFound(PoolId),

    /// A pool with this id is already stored
    #[error("Duplicate pool: {0}")]
    DuplicatePool(PoolId),

    /// The pool rejected the mutation
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// Seed data could not be built
    #[error("Seed failed: {0}")]
    Seed(#[from] CoreError),
}
