use std::env;
use std::error::Error;
use std::time::Duration;

use crate::store::in_memory::DEFAULT_LOCK_TIMEOUT;

pub const LOCK_TIMEOUT_VAR: &str = "LEDGER_LOCK_TIMEOUT_MS";

/// Runtime settings, taken from the command line and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub commands_path: String,
    pub lock_timeout: Duration,
}

impl Config {
    /// Build from `args` (program name first) and `LEDGER_LOCK_TIMEOUT_MS`.
    pub fn from_args(args: &[String]) -> Result<Self, Box<dyn Error>> {
        Self::from_parts(args, env::var(LOCK_TIMEOUT_VAR).ok())
    }

    fn from_parts(args: &[String], lock_timeout_ms: Option<String>) -> Result<Self, Box<dyn Error>> {
        let program = args.first().map(String::as_str).unwrap_or("account_ledger");
        let [_, commands_path] = args else {
            return Err(format!("Usage: {} <commands.csv>", program).into());
        };

        let lock_timeout = match lock_timeout_ms {
            Some(raw) => {
                let millis: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| format!("invalid {}='{}': {}", LOCK_TIMEOUT_VAR, raw, e))?;
                Duration::from_millis(millis)
            }
            None => DEFAULT_LOCK_TIMEOUT,
        };

        Ok(Self {
            commands_path: commands_path.clone(),
            lock_timeout,
        })
    }
}
