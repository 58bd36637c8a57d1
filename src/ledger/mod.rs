pub mod error;
pub mod service;

pub use error::{ErrorKind, LedgerError, LedgerResult};
pub use service::{LedgerService, Sign};
