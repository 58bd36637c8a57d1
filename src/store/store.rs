use rust_decimal::Decimal;

use crate::accounts::{Account, AccountId};
use crate::store::error::StoreResult;

/// Durable storage of [`Account`] records.
///
/// Implementations must totally order `read_for_update` calls for the same
/// id (one proceeds, the others wait until its transaction ends) and must
/// never make calls for different ids wait on each other.
pub trait AccountStore: Send + Sync {
    type Tx: AccountTx;

    /// Allocate a fresh id and persist a zero balance under it.
    fn create(&self) -> StoreResult<Account> {
        self.create_with_balance(Decimal::ZERO)
    }

    /// Allocate a fresh id and persist `balance` under it.
    fn create_with_balance(&self, balance: Decimal) -> StoreResult<Account>;

    /// Non-locking read of the last committed state.
    fn read(&self, id: AccountId) -> StoreResult<Account>;

    /// Take the exclusive lock on `id`, then read it.
    ///
    /// The lock lives as long as the returned transaction.
    fn read_for_update(&self, id: AccountId) -> StoreResult<Self::Tx>;

    /// Snapshot of every committed record, ordered by id.
    fn accounts(&self) -> StoreResult<Vec<Account>>;
}

/// One open transaction holding the exclusive lock on a single record.
///
/// Dropping it without calling [`commit`](AccountTx::commit) rolls back:
/// nothing saved becomes visible and the lock is released.
pub trait AccountTx {
    /// The record as read under the lock, or as last saved.
    fn account(&self) -> &Account;

    /// Stage the mutated record for commit.
    fn save(&mut self, account: Account) -> StoreResult<()>;

    /// Publish the staged record and release the lock.
    fn commit(self) -> StoreResult<()>;
}
