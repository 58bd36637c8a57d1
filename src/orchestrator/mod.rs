pub mod orchestrator;

pub use orchestrator::{execute, run, run_with, status_code, write_accounts, Outcome};
