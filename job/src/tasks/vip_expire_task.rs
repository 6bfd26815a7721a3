use std::time::Duration;

use chrono::Utc;
use ledger::AppState;

use crate::scheduler::{next_midnight_utc, Shutdown};

/// 会员到期扫描任务
///
/// 每天 UTC 零点执行一次: 等待锚定到绝对时间而不是固定周期,
/// 扫描完成后冷却一段时间再计算下一个零点, 避免同一触发窗口重复执行
pub async fn run(state: AppState, mut shutdown: Shutdown) {
    let cooldown = Duration::from_secs(state.config.job.vip_sweep_cooldown_secs);
    log::info!("会员到期扫描任务启动, 每天 UTC 零点触发");

    loop {
        let now = Utc::now().timestamp();
        let target = next_midnight_utc(now);
        if shutdown.wait_until_timestamp(target, now).await {
            break;
        }

        sweep(&state).await;

        if shutdown.wait(cooldown).await {
            break;
        }
    }

    log::info!("会员到期扫描任务退出");
}

/// 扫描一轮: 单个用户降级失败只记录日志, 不影响其余用户
async fn sweep(state: &AppState) {
    let users = match state.level_service.find_expired_vips().await {
        Ok(users) => users,
        Err(e) => {
            log::error!("查询到期会员失败, 明天零点重试: {}", e);
            return;
        }
    };

    if users.is_empty() {
        log::info!("会员到期扫描: 无到期会员");
        return;
    }

    log::info!("会员到期扫描: {} 个会员已到期", users.len());
    let mut downgraded = 0u64;
    for user in users {
        let Some(user_id) = user.id else {
            continue;
        };
        match state.level_service.handle_user_downgrade(user_id).await {
            Ok(true) => downgraded += 1,
            // 扫描和降级之间被其他路径处理过, 跳过
            Ok(false) => log::debug!("用户 {} 已是基础等级, 跳过", user_id),
            Err(e) => log::error!("用户 {} 降级失败: {}", user_id, e),
        }
    }
    log::info!("会员到期扫描完成: 降级 {} 个用户", downgraded);
}
