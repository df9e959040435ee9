use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountEvent},
    command::{AtmCommand, TransactionKind},
    rates::{ConversionError, ExchangeRateTable},
    store::BalanceStore,
};

#[derive(Debug, Error)]
pub enum AtmError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// Front of the account: takes amounts in any known currency and moves them
/// in and out of the account in base currency.
#[derive(Debug)]
pub struct Atm<S> {
    account: Account<S>,
    rates: ExchangeRateTable,
}

impl<S> Atm<S>
where
    S: BalanceStore,
{
    pub fn new(account: Account<S>, rates: ExchangeRateTable) -> Self {
        Self { account, rates }
    }

    /// Opens the account backed by `store` and puts an ATM in front of it.
    pub fn open(store: S, rates: ExchangeRateTable) -> Result<Self, AccountError> {
        Ok(Self::new(Account::open(store)?, rates))
    }

    pub fn deposit(&mut self, amount: f64, currency: &str) -> Result<AccountEvent, AtmError> {
        let amount = self.convert(amount, currency)?;
        Ok(self.account.deposit(amount)?)
    }

    pub fn withdraw(&mut self, amount: f64, currency: &str) -> Result<AccountEvent, AtmError> {
        let amount = self.convert(amount, currency)?;
        Ok(self.account.withdraw(amount)?)
    }

    pub fn execute(&mut self, command: &AtmCommand) -> Result<AccountEvent, AtmError> {
        match command.kind {
            TransactionKind::Deposit => self.deposit(command.amount, &command.currency),
            TransactionKind::Withdrawal => self.withdraw(command.amount, &command.currency),
        }
    }
}

impl<S> Atm<S> {
    pub fn convert(&self, amount: f64, currency: &str) -> Result<f64, ConversionError> {
        self.rates.convert(amount, currency)
    }

    pub fn balance(&self) -> f64 {
        self.account.balance()
    }

    pub fn rates(&self) -> &ExchangeRateTable {
        &self.rates
    }

    pub fn account(&self) -> &Account<S> {
        &self.account
    }
}
