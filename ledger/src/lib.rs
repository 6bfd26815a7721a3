// 账本核心模块
// 余额、账变、订单、会员等级的唯一写入方

pub mod service;
pub mod state;

pub use service::ledger_service::{ChangeReq, LedgerService};
pub use service::level_service::LevelService;
pub use service::opt_log_service::OptLogService;
pub use service::order_service::OrderService;
pub use state::AppState;
