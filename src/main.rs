use::std::env;
use::std::process;

use account_ledger::{run, Config};
use log::info;

fn main() {
    // Expecting exactly one argument: the command CSV file path
    let args: Vec<String> = env::args().collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    // Initialize logger (respect RUST_LOG env var if set)
    env_logger::init();

    info!(
        "starting ledger with file: {} (lock timeout {:?})",
        config.commands_path, config.lock_timeout
    );

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
