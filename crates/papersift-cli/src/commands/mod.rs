//! Command implementations.

pub mod analyze;
pub mod filter;
pub mod init_config;
pub mod stats;

pub use self::analyze::execute_analyze;
pub use self::filter::execute_filter;
pub use self::init_config::execute_init_config;
pub use self::stats::execute_stats;
