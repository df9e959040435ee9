use std::{
    collections::{HashMap, hash_map::Entry},
    io::Read,
};

use csv::Trim;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Currency every balance is kept in.
pub const BASE_CURRENCY: &str = "CAD";

/// Rates used when nothing else is configured, units of CAD per unit.
pub const DEFAULT_RATES: [(&str, f64); 4] =
    [("USD", 2.0), ("MXN", 0.1), ("EUR", 4.0), ("CAD", 1.0)];

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Unknown currency `{currency}`")]
    UnknownCurrency { currency: String },
}

#[derive(Debug, Error)]
pub enum RateTableError {
    #[error("Failed to read exchange rates: {0}")]
    Csv(#[from] csv::Error),
    #[error("Rate for `{currency}` must be a positive number, got {rate}")]
    InvalidRate { currency: String, rate: f64 },
    #[error("Currency `{currency}` is listed more than once")]
    DuplicateCurrency { currency: String },
}

#[derive(Debug, Deserialize)]
struct RateRecord {
    currency: String,
    rate: f64,
}

/// Immutable mapping from currency code to its value in [`BASE_CURRENCY`].
///
/// Codes are matched exactly, `usd` and `USD` are different currencies.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRateTable {
    rates: HashMap<String, f64>,
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        Self {
            rates: DEFAULT_RATES
                .iter()
                .map(|(currency, rate)| (currency.to_string(), *rate))
                .collect(),
        }
    }
}

impl ExchangeRateTable {
    pub fn new<I, C>(rates: I) -> Result<Self, RateTableError>
    where
        I: IntoIterator<Item = (C, f64)>,
        C: Into<String>,
    {
        let mut table = HashMap::new();
        for (currency, rate) in rates {
            let currency = currency.into();
            if !rate.is_finite() || rate <= 0.0 {
                return Err(RateTableError::InvalidRate { currency, rate });
            }
            match table.entry(currency) {
                Entry::Occupied(entry) => {
                    return Err(RateTableError::DuplicateCurrency {
                        currency: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(rate);
                }
            }
        }
        Ok(Self { rates: table })
    }

    /// Reads a table in CSV format with `currency,rate` header.
    pub fn from_csv<R>(source: R) -> Result<Self, RateTableError>
    where
        R: Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(source);
        let records = reader
            .deserialize::<RateRecord>()
            .map(|record| record.map(|r| (r.currency, r.rate)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    pub fn rate(&self, currency: &str) -> Option<f64> {
        self.rates.get(currency).copied()
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Converts `amount` of `currency` into base currency.
    pub fn convert(&self, amount: f64, currency: &str) -> Result<f64, ConversionError> {
        let rate = self
            .rate(currency)
            .ok_or_else(|| ConversionError::UnknownCurrency {
                currency: currency.to_string(),
            })?;
        let converted = amount * rate;
        debug!(amount, currency, rate, converted, "converted to base currency");
        Ok(converted)
    }
}
