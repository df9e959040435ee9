/// Single account balance, mirrored into a [`store::BalanceStore`] on every change.
/// State is modified using events, which are created by handling requested transactions.
pub mod account;

/// Currency conversion in front of the [`account`].
pub mod atm;

/// Validated deposit/withdrawal requests, as they come from the outside.
pub mod command;

/// Exchange rate table, from any known currency into the base currency.
pub mod rates;

/// Storage port for the balance, plus file and "in memory" implementations.
pub mod store;

/// Batch front-end: replays a CSV script of operations against an [`atm::Atm`].
/// Lives in the library, so integration tests can use it as well.
pub mod bin_utils;
