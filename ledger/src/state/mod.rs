use std::sync::Arc;

use rbatis::RBatis;

use common::config::AppConfig;
use common::utils::redis_util::RedisUtil;

use crate::service::ledger_service::LedgerService;
use crate::service::level_service::LevelService;
use crate::service::order_service::OrderService;

/// 应用上下文
///
/// 进程启动时显式构造一次, 传入各任务; 不依赖任何全局状态
#[derive(Clone)]
pub struct AppState {
    pub rb: Arc<RBatis>,
    pub redis: Arc<RedisUtil>,
    pub config: Arc<AppConfig>,
    pub ledger_service: Arc<LedgerService>,
    pub order_service: Arc<OrderService>,
    pub level_service: Arc<LevelService>,
}

impl AppState {
    pub fn new(config: AppConfig, rb: RBatis, redis: RedisUtil) -> Self {
        let rb = Arc::new(rb);
        let redis = Arc::new(redis);

        let ledger_service = Arc::new(LedgerService::new(rb.clone()));
        let order_service = Arc::new(OrderService::new(
            rb.clone(),
            redis.clone(),
            config.order.clone(),
        ));
        let level_service = Arc::new(LevelService::new(rb.clone()));

        Self {
            rb,
            redis,
            config: Arc::new(config),
            ledger_service,
            order_service,
            level_service,
        }
    }
}
