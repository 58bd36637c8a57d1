use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier allocated by the store when an account is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AccountId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A monetary account as held by the store.
///
/// `id` is `None` until the store assigns one. `balance` never drops below
/// zero in any committed state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    pub id: Option<AccountId>,
    pub balance: Decimal,
}

impl Account {
    pub fn new(id: AccountId, balance: Decimal) -> Self {
        Self {
            id: Some(id),
            balance,
        }
    }

    /// Balance after crediting `amount`.
    pub fn credited(&self, amount: Decimal) -> Result<Decimal, BalanceError> {
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(BalanceError::OutOfRange)?;
        // Decimal rounds silently once both scales no longer fit in 96 bits
        if balance.checked_sub(amount) != Some(self.balance)
            || balance.checked_sub(self.balance) != Some(amount)
        {
            return Err(BalanceError::OutOfRange);
        }
        Ok(balance)
    }

    /// Balance after debiting `amount`.
    pub fn debited(&self, amount: Decimal) -> Result<Decimal, BalanceError> {
        if amount > self.balance {
            return Err(BalanceError::Overdrawn);
        }
        let balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BalanceError::OutOfRange)?;
        if balance.checked_add(amount) != Some(self.balance)
            || self.balance.checked_sub(balance) != Some(amount)
        {
            return Err(BalanceError::OutOfRange);
        }
        Ok(balance)
    }
}

/// Why a balance could not be moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceError {
    Overdrawn,
    /// The exact result does not fit in a `Decimal`.
    OutOfRange,
}
