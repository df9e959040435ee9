use thiserror::Error;

pub mod file_store;
pub mod in_memory_store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Persisted balance `{content}` is not a valid non-negative number")]
    CorruptState { content: String },
    #[error("Refusing to persist balance {balance}, it is not a valid non-negative number")]
    InvalidBalance { balance: f64 },
    #[error("Failed to persist balance")]
    Persistence(#[from] std::io::Error),
}

/// Durable home of the account balance.
///
/// `load` returns `None` when nothing was ever persisted; `save` overwrites
/// whatever was stored before.
pub trait BalanceStore {
    fn load(&mut self) -> Result<Option<f64>, StoreError>;

    fn save(&mut self, balance: f64) -> Result<(), StoreError>;
}

pub fn is_valid_balance(balance: f64) -> bool {
    balance.is_finite() && balance >= 0.0
}

/// Parses the textual representation of a persisted balance.
pub fn parse_balance(content: &str) -> Result<f64, StoreError> {
    match content.trim().parse::<f64>() {
        Ok(balance) if is_valid_balance(balance) => Ok(balance),
        _ => Err(StoreError::CorruptState {
            content: content.to_string(),
        }),
    }
}

pub fn format_balance(balance: f64) -> String {
    // shortest representation which parses back to the same value
    format!("{balance}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_balances() {
        assert_eq!(parse_balance("1000").unwrap(), 1000.0);
        assert_eq!(parse_balance("1100.5\n").unwrap(), 1100.5);
        assert_eq!(parse_balance("  0 ").unwrap(), 0.0);
    }

    #[test]
    fn reject_corrupt_balances() {
        for content in ["", "   ", "abc", "12abc", "NaN", "inf", "-5"] {
            let err = parse_balance(content).unwrap_err();
            assert!(
                matches!(&err, StoreError::CorruptState { content: c } if c == content),
                "{content:?} should be corrupt"
            );
        }
    }

    #[test]
    fn formatted_balance_parses_back() {
        for balance in [0.0, 1000.0, 0.1 + 0.2, 1234.5678, 1e-7] {
            assert_eq!(parse_balance(&format_balance(balance)).unwrap(), balance);
        }
        assert_eq!(format_balance(1000.0), "1000");
    }
}
