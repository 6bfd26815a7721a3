pub mod coin_change;
pub mod level_code;
pub mod opt_type;
pub mod order_status;

pub use coin_change::{AssetType, ChangeDirection, CoinChangeType};
pub use level_code::LevelCode;
pub use opt_type::OptType;
pub use order_status::OrderStatus;
