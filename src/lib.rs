pub mod accounts;
pub mod commands;
pub mod config;
pub mod ledger;
pub mod orchestrator;
pub mod store;

pub use accounts::{Account, AccountId};
pub use config::Config;
pub use ledger::{ErrorKind, LedgerError, LedgerResult, LedgerService, Sign};
pub use orchestrator::run;
pub use store::{AccountStore, AccountTx, InMemoryAccountStore, StoreError};
