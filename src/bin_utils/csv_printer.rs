use std::io::Write;

use crate::command::TransactionKind;
use csv::Writer;
use serde::Serialize;

/// Outcome of a successful operation. `amount` is in `currency`,
/// `base_amount` and `balance` in base currency.
#[derive(Debug, Serialize)]
pub struct Receipt {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub currency: String,
    pub base_amount: f64,
    pub balance: f64,
}

pub struct ReceiptPrinter<W>
where
    W: Write,
{
    writer: Writer<W>,
}

impl<W> ReceiptPrinter<W>
where
    W: Write,
{
    pub fn new(output: W) -> Self {
        Self {
            writer: Writer::from_writer(output),
        }
    }

    pub fn print(&mut self, receipt: &Receipt) -> anyhow::Result<()> {
        if let Err(err) = self.writer.serialize(receipt) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
        Ok(())
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        if let Err(err) = self.writer.flush() {
            anyhow::bail!("Failed to flush CSV writer: {err}")
        }
        Ok(())
    }
}
