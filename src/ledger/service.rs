use log::{info, warn};
use rust_decimal::Decimal;

use crate::accounts::{Account, AccountId, BalanceError};
use crate::ledger::error::{ErrorKind, LedgerError, LedgerResult};
use crate::store::{AccountStore, AccountTx};

/// Direction of a balance delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Deposit.
    Credit,
    /// Withdrawal.
    Debit,
}

/// Balance mutation rules on top of an [`AccountStore`].
///
/// Holds no balances of its own: every mutation re-reads the record under the
/// store's exclusive lock, so concurrent deltas on one account are applied one
/// at a time while deltas on different accounts run in parallel.
pub struct LedgerService<S> {
    store: S,
}

impl<S: AccountStore> LedgerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Non-locking read of an account.
    pub fn find_by_id(&self, id: AccountId) -> LedgerResult<Account> {
        self.store.read(id).map_err(LedgerError::from).inspect_err(|err| {
            if err.kind() == ErrorKind::StoreFault {
                warn!("reading account {} failed: {}", id, err);
            }
        })
    }

    /// Open a new account with a zero balance.
    pub fn create_account(&self) -> LedgerResult<Account> {
        let account = self.store.create().inspect_err(|err| {
            warn!("creating account failed: {}", err);
        })?;
        if let Some(id) = account.id {
            info!("created account {}", id);
        }
        Ok(account)
    }

    pub fn deposit(&self, id: AccountId, amount: Decimal) -> LedgerResult<()> {
        self.apply_delta(id, amount, Sign::Credit)
    }

    pub fn withdraw(&self, id: AccountId, amount: Decimal) -> LedgerResult<()> {
        self.apply_delta(id, amount, Sign::Debit)
    }

    /// Add (`Sign::Credit`) or subtract (`Sign::Debit`) `amount` on account `id`.
    ///
    /// `amount` must be strictly positive for both signs; this is checked
    /// before the lock is requested. Either the whole delta is committed or
    /// nothing changes, and the lock is released on every path out.
    pub fn apply_delta(&self, id: AccountId, amount: Decimal, sign: Sign) -> LedgerResult<()> {
        check_positive(amount)?;
        self.apply_locked(id, amount, sign).inspect_err(|err| {
            warn!("{:?} of {} on account {} rejected: {}", sign, amount, id, err);
        })
    }

    pub fn accounts(&self) -> LedgerResult<Vec<Account>> {
        Ok(self.store.accounts()?)
    }

    fn apply_locked(&self, id: AccountId, amount: Decimal, sign: Sign) -> LedgerResult<()> {
        let mut tx = self.store.read_for_update(id)?;
        let mut account = tx.account().clone();

        let balance = match sign {
            Sign::Credit => account.credited(amount),
            Sign::Debit => account.debited(amount),
        };
        // Returning drops `tx`, which rolls back and unlocks
        account.balance = balance.map_err(|err| match err {
            BalanceError::Overdrawn => LedgerError::InsufficientFunds,
            BalanceError::OutOfRange => LedgerError::validation("amount out of range"),
        })?;
        let balance = account.balance;

        tx.save(account)?;
        tx.commit()?;
        info!("{:?} of {} on account {} committed, balance {}", sign, amount, id, balance);
        Ok(())
    }
}

fn check_positive(amount: Decimal) -> LedgerResult<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation("amount must be positive"));
    }
    Ok(())
}
