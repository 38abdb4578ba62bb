//! Utility module - logging, business time zone and input validation

pub mod logger;
pub mod money;
pub mod time;
pub mod validation;

pub use logger::{cleanup_old_logs, init_logger_with_file};
pub use money::format_rupiah;
