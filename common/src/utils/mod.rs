pub mod amount_util;
pub mod order_no_util;
pub mod redis_util;
pub mod sign_util;
pub mod snowflake;
