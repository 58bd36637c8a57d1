pub mod command;

pub use command::{CommandRecord, CommandType};
