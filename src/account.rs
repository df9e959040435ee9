use thiserror::Error;
use tracing::info;

use crate::{
    command::TransactionKind,
    store::{BalanceStore, StoreError, is_valid_balance},
};

/// Balance a brand new account starts with, in base currency.
pub const DEFAULT_BALANCE: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountEventKind {
    Deposited,
    Withdrawn,
}

/// Accepted change of the balance, amount is in base currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountEvent {
    amount: f64,
    kind: AccountEventKind,
}

impl AccountEvent {
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn kind(&self) -> AccountEventKind {
        self.kind
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: f64, available: f64 },
    #[error("Balance would become {resulting}, which is not a valid non-negative number")]
    BalanceOutOfRange { amount: f64, resulting: f64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Single account with its balance mirrored into a [`BalanceStore`].
///
/// The in-memory balance is the source of truth while the process runs,
/// storage is only read once, when the account is opened.
#[derive(Debug)]
pub struct Account<S> {
    balance: f64,
    store: S,
}

impl<S> Account<S>
where
    S: BalanceStore,
{
    pub fn open(mut store: S) -> Result<Self, AccountError> {
        let balance = Self::load_balance(&mut store)?;
        info!(balance, "account opened");
        Ok(Self { balance, store })
    }

    /// Reads the persisted balance, initializing storage with
    /// [`DEFAULT_BALANCE`] when there is no record yet.
    pub fn load_balance(store: &mut S) -> Result<f64, StoreError> {
        match store.load()? {
            Some(balance) => Ok(balance),
            None => {
                info!(balance = DEFAULT_BALANCE, "initializing new balance");
                store.save(DEFAULT_BALANCE)?;
                Ok(DEFAULT_BALANCE)
            }
        }
    }

    pub fn deposit(&mut self, amount: f64) -> Result<AccountEvent, AccountError> {
        self.execute(TransactionKind::Deposit, amount)
    }

    /// Fails with [`AccountError::InsufficientFunds`] when the balance doesn't
    /// cover `amount`, in which case nothing changes.
    pub fn withdraw(&mut self, amount: f64) -> Result<AccountEvent, AccountError> {
        self.execute(TransactionKind::Withdrawal, amount)
    }

    /// If saving fails, the event stays applied in memory and the storage
    /// error is returned, so the caller knows both have diverged.
    fn execute(
        &mut self,
        kind: TransactionKind,
        amount: f64,
    ) -> Result<AccountEvent, AccountError> {
        let event = self.handle_transaction(kind, amount)?;
        self.apply(&event);
        self.store.save(self.balance)?;
        Ok(event)
    }
}

impl<S> Account<S> {
    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn apply(&mut self, event: &AccountEvent) {
        match event.kind {
            AccountEventKind::Deposited => {
                self.balance += event.amount;
            }
            AccountEventKind::Withdrawn => {
                self.balance -= event.amount;
            }
        }
    }

    /// Rejects anything that would leave the balance negative or not finite.
    pub fn handle_transaction(
        &self,
        kind: TransactionKind,
        amount: f64,
    ) -> Result<AccountEvent, AccountError> {
        let event = match kind {
            TransactionKind::Deposit => AccountEvent {
                amount,
                kind: AccountEventKind::Deposited,
            },
            TransactionKind::Withdrawal => {
                if self.balance >= amount {
                    AccountEvent {
                        amount,
                        kind: AccountEventKind::Withdrawn,
                    }
                } else {
                    return Err(AccountError::InsufficientFunds {
                        requested: amount,
                        available: self.balance,
                    });
                }
            }
        };
        let resulting = match event.kind {
            AccountEventKind::Deposited => self.balance + amount,
            AccountEventKind::Withdrawn => self.balance - amount,
        };
        if !is_valid_balance(resulting) {
            return Err(AccountError::BalanceOutOfRange { amount, resulting });
        }
        Ok(event)
    }
}
