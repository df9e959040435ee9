use std::fs::File;

use anyhow::{Context, Result};
use atm_converter::{
    atm::Atm,
    bin_utils::{OperationError, Service, config::AtmConfig, init_tracing},
    store::file_store::FileBalanceStore,
};
use tracing::error;

fn main() -> Result<()> {
    init_tracing();
    let filename = std::env::args()
        .nth(1)
        .context("Expected an operations file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let config = AtmConfig::from_env();
    let rates = config.load_rates()?;
    let atm = Atm::open(FileBalanceStore::new(&config.balance_path), rates).with_context(|| {
        format!(
            "Failed to open account stored at `{}`",
            config.balance_path.display()
        )
    })?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        atm,
        error_printer: Box::new(|line, err| {
            match err {
                OperationError::Parse(err) => error!(line, %err, "malformed operation"),
                OperationError::CommandErr(err) => error!(line, %err, "invalid operation"),
                OperationError::AtmErr(_) => {
                    // rejected by the ATM itself, already logged by the service
                }
            }
        }),
    };
    service.run()?;
    Ok(())
}
