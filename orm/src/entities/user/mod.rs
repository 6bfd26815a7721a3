pub mod app_coin_change;
pub mod app_user;

pub use app_coin_change::AppCoinChange;
pub use app_user::AppUser;
