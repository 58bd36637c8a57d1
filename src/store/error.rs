use std::time::Duration;

use thiserror::Error;

use crate::accounts::AccountId;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by an [`AccountStore`](super::AccountStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Account with id='{0}' not found")]
    NotFound(AccountId),

    /// The record lock could not be acquired within the store's timeout.
    #[error("timed out after {waited:?} waiting for the lock on account '{id}'")]
    LockTimeout { id: AccountId, waited: Duration },

    /// The store refused to persist a record.
    #[error("record rejected: {0}")]
    Rejected(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
