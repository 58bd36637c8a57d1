//! Ledger error model.

use thiserror::Error;

use crate::accounts::AccountId;
use crate::store::StoreError;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Error returned by every [`LedgerService`](super::LedgerService) operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Rejected before any lock was taken.
    #[error("{0}")]
    Validation(String),

    #[error("Account with id='{0}' not found")]
    NotFound(AccountId),

    /// The withdrawal would overdraw the account; nothing was changed.
    #[error("Not enough money")]
    InsufficientFunds,

    /// The store failed or timed out; the mutation did not happen.
    #[error("store fault: {0}")]
    Store(#[source] StoreError),
}

/// The closed set of outcomes a caller has to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InsufficientFunds,
    StoreFault,
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Validation(_) => ErrorKind::Validation,
            LedgerError::NotFound(_) => ErrorKind::NotFound,
            LedgerError::InsufficientFunds => ErrorKind::InsufficientFunds,
            LedgerError::Store(_) => ErrorKind::StoreFault,
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => LedgerError::NotFound(id),
            other => LedgerError::Store(other),
        }
    }
}
