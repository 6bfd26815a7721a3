// 公共模块
// 提供配置、日志、错误处理、Redis 连接池等通用功能

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod logger;
pub mod models;
pub mod redis;
pub mod utils;

// 重新导出常用类型和函数
pub use config::{AppConfig, DatabaseConfig, JobConfig, LogConfig, OrderConfig, RedisConfig};
pub use error::{AppError, AppResult};
pub use logger::{init_logger, init_logger_with_level};

// 数据库相关
pub use config::db_conf::connect as connect_db;
