//! Property checks of deposits and withdrawals through the ATM.

use atm_converter::{
    account::AccountError,
    atm::{Atm, AtmError},
    rates::ExchangeRateTable,
    store::{BalanceStore, file_store::FileBalanceStore, in_memory_store::InMemoryBalanceStore},
};
use proptest::prelude::*;

fn arb_currency() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["USD", "MXN", "EUR", "CAD"])
}

fn atm_with(balance: f64) -> Atm<InMemoryBalanceStore> {
    Atm::open(
        InMemoryBalanceStore::with_balance(balance),
        ExchangeRateTable::default(),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn deposit_adds_converted_amount(
        start in 0.0f64..1e9,
        amount in 0.0f64..1e6,
        currency in arb_currency(),
    ) {
        let mut atm = atm_with(start);
        let rate = atm.rates().rate(currency).unwrap();

        atm.deposit(amount, currency).unwrap();
        prop_assert_eq!(atm.balance(), start + amount * rate);
        prop_assert_eq!(atm.account().store().persisted(), Some(atm.balance()));
    }

    #[test]
    fn withdraw_over_balance_is_rejected(
        start in 0.0f64..1e4,
        amount in 0.0f64..1e5,
        currency in arb_currency(),
    ) {
        let mut atm = atm_with(start);
        let rate = atm.rates().rate(currency).unwrap();
        prop_assume!(amount * rate > start);

        let err = atm.withdraw(amount, currency).unwrap_err();
        let rejected = matches!(
            err,
            AtmError::AccountErr(AccountError::InsufficientFunds { .. })
        );
        prop_assert!(rejected, "expected insufficient funds, got {:?}", err);
        prop_assert_eq!(atm.balance(), start);
        prop_assert_eq!(atm.account().store().saves(), 0);
    }

    #[test]
    fn withdraw_within_balance_subtracts_converted_amount(
        start in 0.0f64..1e5,
        amount in 0.0f64..1e4,
        currency in arb_currency(),
    ) {
        let mut atm = atm_with(start);
        let rate = atm.rates().rate(currency).unwrap();
        prop_assume!(amount * rate <= start);

        atm.withdraw(amount, currency).unwrap();
        prop_assert_eq!(atm.balance(), start - amount * rate);
        prop_assert!(atm.balance() >= 0.0);
    }

    #[test]
    fn persisted_balance_reloads_unchanged(balance in 0.0f64..1e12) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balance.txt");

        FileBalanceStore::new(&path).save(balance).unwrap();
        prop_assert_eq!(FileBalanceStore::new(&path).load().unwrap(), Some(balance));
    }
}
