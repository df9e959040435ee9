use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};

use crate::rates::ExchangeRateTable;

pub const BALANCE_FILE_VAR: &str = "ATM_BALANCE_FILE";
pub const RATES_FILE_VAR: &str = "ATM_RATES_FILE";
pub const DEFAULT_BALANCE_FILE: &str = "balance.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtmConfig {
    /// Where the balance is persisted.
    pub balance_path: PathBuf,
    /// CSV rate table, built-in rates are used when absent.
    pub rates_path: Option<PathBuf>,
}

impl AtmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            balance_path: non_empty(BALANCE_FILE_VAR)
                .unwrap_or_else(|| DEFAULT_BALANCE_FILE.to_string())
                .into(),
            rates_path: non_empty(RATES_FILE_VAR).map(PathBuf::from),
        }
    }

    pub fn load_rates(&self) -> Result<ExchangeRateTable> {
        let Some(path) = &self.rates_path else {
            return Ok(ExchangeRateTable::default());
        };
        let file = File::open(path)
            .with_context(|| format!("Failed to open rate table `{}`", path.display()))?;
        ExchangeRateTable::from_csv(file)
            .with_context(|| format!("Invalid rate table `{}`", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults() {
        let config = AtmConfig::from_lookup(|_| None);
        assert_eq!(config.balance_path, PathBuf::from(DEFAULT_BALANCE_FILE));
        assert_eq!(config.rates_path, None);
        assert_eq!(config.load_rates().unwrap(), ExchangeRateTable::default());
    }

    #[test]
    fn read_variables() {
        let vars = HashMap::from([
            (BALANCE_FILE_VAR, "/var/lib/atm/balance"),
            (RATES_FILE_VAR, " "),
        ]);
        let config = AtmConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.balance_path, PathBuf::from("/var/lib/atm/balance"));
        // blank means unset
        assert_eq!(config.rates_path, None);
    }

    #[test]
    fn load_rates_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.csv");
        std::fs::write(&path, "currency,rate\nCAD,1\nJPY,0.01\n").unwrap();

        let config = AtmConfig {
            balance_path: dir.path().join("balance.txt"),
            rates_path: Some(path),
        };
        let rates = config.load_rates().unwrap();
        assert_eq!(rates.rate("JPY"), Some(0.01));
    }

    #[test]
    fn missing_rates_file() {
        let config = AtmConfig {
            balance_path: DEFAULT_BALANCE_FILE.into(),
            rates_path: Some("/nonexistent/rates.csv".into()),
        };
        let err = config.load_rates().unwrap_err();
        assert!(err.to_string().starts_with("Failed to open rate table"));
    }
}
