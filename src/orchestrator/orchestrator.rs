use std::fs::File;
use std::error::Error;
use std::io::{self, Read, Write};
use csv::{ReaderBuilder, Writer};
use log::{debug, info};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::accounts::AccountId;
use crate::commands::{CommandRecord, CommandType};
use crate::config::Config;
use crate::ledger::{ErrorKind, LedgerError, LedgerResult, LedgerService};
use crate::store::{AccountStore, InMemoryAccountStore};

/// Result of one command, as written to the outcome CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    #[serde(rename = "type")]
    pub cmd_type: CommandType,
    pub account: Option<AccountId>,
    pub status: u16,
    pub balance: Option<Decimal>,
    pub message: String,
}

/// HTTP-style status for a failed command.
pub fn status_code(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::Validation => 400,
        ErrorKind::InsufficientFunds => 403,
        ErrorKind::NotFound => 404,
        ErrorKind::StoreFault => 503,
    }
}

/// Run a single command against the ledger.
pub fn execute<S: AccountStore>(ledger: &LedgerService<S>, record: &CommandRecord) -> Outcome {
    let outcome = match record.cmd_type {
        CommandType::Open => ledger
            .create_account()
            .map(|account| (account.id, 201u16, Some(account.balance), "created")),
        CommandType::Balance => required_account(record).and_then(|id| {
            let account = ledger.find_by_id(id)?;
            Ok((Some(id), 200, Some(account.balance), "ok"))
        }),
        CommandType::Deposit | CommandType::Withdrawal => required_account(record).and_then(|id| {
            let amount = record
                .amount
                .ok_or_else(|| LedgerError::validation("amount is required"))?;
            if record.cmd_type == CommandType::Deposit {
                ledger.deposit(id, amount)?;
            } else {
                ledger.withdraw(id, amount)?;
            }
            Ok((Some(id), 202, None, "accepted"))
        }),
    };

    match outcome {
        Ok((account, status, balance, message)) => Outcome {
            cmd_type: record.cmd_type,
            account,
            status,
            balance,
            message: message.to_string(),
        },
        Err(err) => Outcome {
            cmd_type: record.cmd_type,
            account: record.account,
            status: status_code(err.kind()),
            balance: None,
            message: err.to_string(),
        },
    }
}

fn required_account(record: &CommandRecord) -> LedgerResult<AccountId> {
    record
        .account
        .ok_or_else(|| LedgerError::validation("account is required"))
}

/// Execute every command read from `input`, writing one outcome row each.
///
/// A row that cannot be parsed aborts the run.
pub fn run_with<R: Read, W: Write, S: AccountStore>(
    input: R,
    output: W,
    ledger: &LedgerService<S>,
) -> Result<(), Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut wtr = Writer::from_writer(output);

    let mut processed = 0usize;
    for result in rdr.deserialize() {
        let record: CommandRecord = result?;
        debug!("processing {:?}", record);
        wtr.serialize(execute(ledger, &record))?;
        processed += 1;
    }
    wtr.flush()?;

    info!("processed {} commands", processed);
    Ok(())
}

/// Write every account and its balance in CSV format.
pub fn write_accounts<W: Write, S: AccountStore>(
    output: W,
    ledger: &LedgerService<S>,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(output);
    wtr.write_record(["account", "balance"])?;

    for account in ledger.accounts()? {
        wtr.serialize((account.id, account.balance.round_dp(4)))?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let file = File::open(&config.commands_path)?;
    let ledger = LedgerService::new(InMemoryAccountStore::with_lock_timeout(config.lock_timeout));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with(file, &mut out, &ledger)?;
    writeln!(out)?;
    write_accounts(&mut out, &ledger)?;

    Ok(())
}
