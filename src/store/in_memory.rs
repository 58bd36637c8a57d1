use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::debug;
use parking_lot::{ArcMutexGuard, Mutex, RawMutex, RwLock};
use rust_decimal::Decimal;

use crate::accounts::{Account, AccountId};
use crate::store::error::{StoreError, StoreResult};
use crate::store::store::{AccountStore, AccountTx};

pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// A stored record: the exclusive update lock, and the last committed state.
///
/// Plain reads only touch `committed`, so they never wait for an open
/// transaction on the same record.
struct Record {
    lock: Arc<Mutex<()>>,
    committed: RwLock<Account>,
}

impl Record {
    fn new(account: Account) -> Self {
        Self {
            lock: Arc::new(Mutex::new(())),
            committed: RwLock::new(account),
        }
    }
}

/// In-process [`AccountStore`] with one exclusive lock per record.
pub struct InMemoryAccountStore {
    records: RwLock<HashMap<AccountId, Arc<Record>>>,
    next_id: AtomicU64,
    lock_timeout: Duration,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            lock_timeout,
        }
    }

    /// Look up a record. The map lock is released before returning, so
    /// callers can wait on the record's own lock without blocking others.
    fn record(&self, id: AccountId) -> StoreResult<Arc<Record>> {
        self.records
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    type Tx = InMemoryTx;

    fn create_with_balance(&self, balance: Decimal) -> StoreResult<Account> {
        if balance < Decimal::ZERO {
            return Err(StoreError::rejected(format!(
                "negative opening balance {balance}"
            )));
        }
        let id = AccountId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let account = Account::new(id, balance);
        self.records
            .write()
            .insert(id, Arc::new(Record::new(account.clone())));
        debug!("stored account {} with balance {}", id, balance);
        Ok(account)
    }

    fn read(&self, id: AccountId) -> StoreResult<Account> {
        let record = self.record(id)?;
        let account = record.committed.read().clone();
        Ok(account)
    }

    fn read_for_update(&self, id: AccountId) -> StoreResult<InMemoryTx> {
        let record = self.record(id)?;
        let guard = record
            .lock
            .try_lock_arc_for(self.lock_timeout)
            .ok_or(StoreError::LockTimeout {
                id,
                waited: self.lock_timeout,
            })?;
        debug!("locked account {}", id);
        let current = record.committed.read().clone();
        Ok(InMemoryTx {
            id,
            record,
            current,
            staged: false,
            committed: false,
            _guard: guard,
        })
    }

    fn accounts(&self) -> StoreResult<Vec<Account>> {
        let records: Vec<Arc<Record>> = self.records.read().values().cloned().collect();
        let mut accounts: Vec<Account> = records
            .iter()
            .map(|record| record.committed.read().clone())
            .collect();
        accounts.sort_by_key(|account| account.id);
        Ok(accounts)
    }
}

/// Transaction over one [`InMemoryAccountStore`] record.
///
/// Holds the record's lock until committed or dropped.
pub struct InMemoryTx {
    id: AccountId,
    record: Arc<Record>,
    current: Account,
    staged: bool,
    committed: bool,
    _guard: ArcMutexGuard<RawMutex, ()>,
}

impl AccountTx for InMemoryTx {
    fn account(&self) -> &Account {
        &self.current
    }

    fn save(&mut self, account: Account) -> StoreResult<()> {
        if account.id != Some(self.id) {
            return Err(StoreError::rejected(format!(
                "transaction on account {} cannot save a different record",
                self.id
            )));
        }
        if account.balance < Decimal::ZERO {
            return Err(StoreError::rejected(format!(
                "negative balance {} for account {}",
                account.balance, self.id
            )));
        }
        self.current = account;
        self.staged = true;
        Ok(())
    }

    fn commit(mut self) -> StoreResult<()> {
        if self.staged {
            *self.record.committed.write() = self.current.clone();
        }
        self.committed = true;
        debug!("committed account {}", self.id);
        Ok(())
    }
}

impl Drop for InMemoryTx {
    fn drop(&mut self) {
        if !self.committed {
            debug!("rolled back account {}", self.id);
        }
    }
}
