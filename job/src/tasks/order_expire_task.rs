use std::time::Duration;

use ledger::AppState;

use crate::scheduler::Shutdown;

/// 订单过期扫描任务
///
/// 固定间隔取消已过期的待支付订单; 整批失败记录日志后
/// 下个周期重试, 不影响任务循环
pub async fn run(state: AppState, mut shutdown: Shutdown) {
    let interval = Duration::from_secs(state.config.job.order_sweep_interval_secs);
    log::info!("订单过期扫描任务启动, 间隔 {:?}", interval);

    loop {
        if shutdown.wait(interval).await {
            break;
        }

        match state.order_service.expire_pending_orders().await {
            Ok(0) => log::debug!("订单过期扫描: 无过期订单"),
            Ok(count) => log::info!("订单过期扫描: 取消 {} 笔过期订单", count),
            Err(e) => log::error!("订单过期扫描失败, 下个周期重试: {}", e),
        }
    }

    log::info!("订单过期扫描任务退出");
}
