pub mod ledger_service;
pub mod level_service;
pub mod opt_log_service;
pub mod order_service;
