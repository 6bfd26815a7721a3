pub mod app_config;
pub mod db_conf;

pub use app_config::{AppConfig, DatabaseConfig, JobConfig, LogConfig, OrderConfig, RedisConfig};
