use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

/// Validated request coming from the presentation layer, amount still in
/// the customer's currency.
#[derive(Debug, Clone, PartialEq)]
pub struct AtmCommand {
    pub kind: TransactionKind,
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum AtmCommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: TransactionKind },
    #[error("Amount must not be negative for {kind:?}")]
    NegativeAmount { kind: TransactionKind },
    #[error("Amount must be a finite number for {kind:?}")]
    NonFiniteAmount { kind: TransactionKind },
    #[error("Currency is required for {kind:?}")]
    CurrencyRequired { kind: TransactionKind },
}

impl AtmCommand {
    pub fn parse_command(
        kind: TransactionKind,
        amount: Option<f64>,
        currency: Option<&str>,
    ) -> Result<Self, AtmCommandError> {
        let Some(amount) = amount else {
            return Err(AtmCommandError::AmountRequired { kind });
        };
        if !amount.is_finite() {
            return Err(AtmCommandError::NonFiniteAmount { kind });
        }
        if amount < 0.0 {
            return Err(AtmCommandError::NegativeAmount { kind });
        }
        match currency.map(str::trim) {
            Some(currency) if !currency.is_empty() => Ok(Self {
                kind,
                amount,
                currency: currency.to_string(),
            }),
            _ => Err(AtmCommandError::CurrencyRequired { kind }),
        }
    }
}
