use super::{BalanceStore, StoreError};

/// Store which never touches the disk, handy for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBalanceStore {
    balance: Option<f64>,
    saves: usize,
}

impl InMemoryBalanceStore {
    pub fn with_balance(balance: f64) -> Self {
        Self {
            balance: Some(balance),
            saves: 0,
        }
    }

    pub fn persisted(&self) -> Option<f64> {
        self.balance
    }

    /// Number of successful `save` calls so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl BalanceStore for InMemoryBalanceStore {
    fn load(&mut self) -> Result<Option<f64>, StoreError> {
        Ok(self.balance)
    }

    fn save(&mut self, balance: f64) -> Result<(), StoreError> {
        self.balance = Some(balance);
        self.saves += 1;
        Ok(())
    }
}
