use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Open,
    Balance,
    Deposit,
    Withdrawal,
}

/// One row of the command CSV (`type,account,amount`).
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRecord {
    #[serde(rename = "type")]
    pub cmd_type: CommandType,
    pub account: Option<AccountId>,
    pub amount: Option<Decimal>,
}
