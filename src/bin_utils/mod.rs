//! This module could be a separate crate on its own, to bootstrap [`atm_converter`](crate)
//! within binary, it stays in the library so integration tests can drive it.

use std::io::{Read, Write};

use crate::{
    account::AccountError,
    atm::{Atm, AtmError},
    command::{AtmCommand, AtmCommandError},
    store::BalanceStore,
};
use anyhow::{Context, Result};
use csv_parser::CsvOperationParser;
use csv_printer::{Receipt, ReceiptPrinter};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
pub mod config;
pub mod csv_parser;
pub mod csv_printer;

pub const LOG_FORMAT_VAR: &str = "ATM_LOG_FORMAT";

/// Operation rejected without touching the persisted balance.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Malformed operation: {0}")]
    Parse(#[from] csv::Error),
    #[error(transparent)]
    CommandErr(#[from] AtmCommandError),
    #[error(transparent)]
    AtmErr(#[from] AtmError),
}

pub struct Service<'w, R, W: 'w, S> {
    pub input: R,
    pub output: &'w mut W,
    pub atm: Atm<S>,
    pub error_printer: Box<dyn FnMut(u64, OperationError)>,
}

impl<'w, R, W, S> Service<'w, R, W, S>
where
    R: Read,
    W: Write + 'w,
    S: BalanceStore,
{
    /// Replays every operation of the input, printing a receipt for each
    /// accepted one. Rejected rows are handed to `error_printer` and skipped.
    ///
    /// Stops at the first storage failure, since from then on memory and
    /// storage disagree. Returns the ATM so the final state can be inspected.
    pub fn run(mut self) -> Result<Atm<S>> {
        let parser = CsvOperationParser::new(self.input).context("Failed to read CSV header")?;
        let mut printer = ReceiptPrinter::new(&mut *self.output);

        for (line, row) in parser {
            let command = match row.map_err(OperationError::from).and_then(|row| {
                Ok(AtmCommand::parse_command(
                    row.kind,
                    row.amount,
                    row.currency.as_deref(),
                )?)
            }) {
                Ok(command) => command,
                Err(err) => {
                    (self.error_printer)(line, err);
                    continue;
                }
            };

            match self.atm.execute(&command) {
                Ok(event) => printer.print(&Receipt {
                    kind: command.kind,
                    amount: command.amount,
                    currency: command.currency,
                    base_amount: event.amount(),
                    balance: self.atm.balance(),
                })?,
                Err(AtmError::AccountErr(AccountError::Store(err))) => {
                    printer.flush()?;
                    return Err(anyhow::Error::new(err)
                        .context(format!("Operation at line {line} was not persisted")));
                }
                Err(err) => {
                    warn!(line, %err, "operation rejected");
                    (self.error_printer)(line, err.into());
                }
            }
        }

        printer.flush()?;
        info!(balance = self.atm.balance(), "all operations processed");
        Ok(self.atm)
    }
}

/// Installs the global subscriber: `RUST_LOG` filter (`info` by default),
/// human readable output unless `ATM_LOG_FORMAT=json`.
pub fn init_tracing() {
    let log_format = std::env::var(LOG_FORMAT_VAR).unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
