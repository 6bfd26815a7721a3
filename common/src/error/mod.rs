// 错误处理模块
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("Redis错误: {0}")]
    RedisError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("验证错误: {0}")]
    ValidationError(String),

    #[error("余额不足")]
    InsufficientBalance,

    #[error("冻结余额不足")]
    InsufficientFrozenBalance,

    #[error("支付签名校验失败")]
    InvalidSignature,

    #[error("订单不存在: {0}")]
    OrderNotFound(String),

    #[error("订单已终态, 不允许再变更: {order_no} (状态: {status})")]
    OrderAlreadyTerminal { order_no: String, status: String },

    #[error("用户不存在: {0}")]
    UserNotFound(i64),

    #[error("业务错误: {0}")]
    BusinessError(String),
}

pub type AppResult<T> = Result<T, AppError>;

// 从 rbatis 错误转换 (rbatis::Error 包含了 rbdc::Error)
impl From<rbatis::Error> for AppError {
    fn from(err: rbatis::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

// 从 redis 连接池错误转换
impl From<deadpool_redis::PoolError> for AppError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        AppError::RedisError(err.to_string())
    }
}

impl From<deadpool_redis::redis::RedisError> for AppError {
    fn from(err: deadpool_redis::redis::RedisError) -> Self {
        AppError::RedisError(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
