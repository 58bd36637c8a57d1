pub mod error;
pub mod in_memory;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use in_memory::{InMemoryAccountStore, InMemoryTx};
pub use store::{AccountStore, AccountTx};
