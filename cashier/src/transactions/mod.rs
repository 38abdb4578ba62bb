//! Transactions: building, persistence boundary and the local ledger

pub mod builder;
pub mod ledger;
pub mod repository;

pub use builder::{BuyerContext, ValidationError, build, build_at};
pub use ledger::{Ledger, LedgerError, LedgerQuery, LedgerView, Period, UnknownPeriod};
pub use repository::{PersistedTransaction, TransactionRepository};
