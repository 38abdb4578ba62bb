//! Cashier - point-of-sale core
//!
//! # Overview
//!
//! - **Cart** (`cart`): line items with price snapshots
//! - **Transactions** (`transactions`): builder, ledger, persistence boundary
//! - **Catalog** (`catalog`): cached products and payment methods
//! - **Session** (`session`): one cashier's cart, form, catalog and ledger
//! - **Reports** (`reports`): rows, summary and CSV export
//!
//! # Module layout
//!
//! ```text
//! cashier/src/
//! ├── core/          # config, errors
//! ├── cart/          # cart engine
//! ├── catalog/       # catalog repository + store
//! ├── transactions/  # builder, ledger, repository
//! ├── storage/       # repository errors, in-memory backend
//! ├── remote.rs      # HTTP backend adapter
//! ├── session.rs     # cashier session
//! ├── reports/       # projector, CSV export
//! └── utils/         # logger, time, money, validation
//! ```

pub mod cart;
pub mod catalog;
pub mod core;
pub mod remote;
pub mod reports;
pub mod session;
pub mod storage;
pub mod transactions;
pub mod utils;

pub use cart::{Cart, CartError, CartLine};
pub use catalog::{CatalogRepository, CatalogStore, CategoryFilter};
pub use core::{CashierError, CashierResult, Config, Resource};
pub use remote::RemoteBackend;
pub use reports::{Report, ReportProjector, ReportSummary};
pub use session::CashierSession;
pub use storage::{InMemoryBackend, RepoError, RepoResult};
pub use transactions::{
    BuyerContext, Ledger, LedgerError, LedgerQuery, Period, TransactionRepository,
    ValidationError,
};

pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

/// Load `.env` and initialize logging from the environment
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    tracing::debug!(
        backend_url = %config.backend_url,
        timezone = %config.timezone,
        environment = %config.environment,
        "Configuration loaded"
    );
    Ok(config)
}
