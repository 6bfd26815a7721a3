use std::time::Duration;

use tokio::sync::watch;

/// 一天的秒数
const SECS_PER_DAY: i64 = 86_400;

/// 创建停止信号对
pub fn shutdown_channel() -> (ShutdownHandle, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, Shutdown { rx })
}

/// 停止信号发送端, 由主流程持有
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// 通知所有任务退出
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// 停止信号接收端, 每个任务持有一份
///
/// 所有等待都会被停止信号提前唤醒, 长睡眠不会拖慢退出
#[derive(Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// 是否已收到停止信号
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// 等待指定时长; 返回 true 表示等待期间收到停止信号
    pub async fn wait(&mut self, duration: Duration) -> bool {
        if self.is_shutdown() {
            return true;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => false,
            changed = self.rx.changed() => match changed {
                Ok(_) => *self.rx.borrow(),
                // 发送端已销毁, 视为停止
                Err(_) => true,
            },
        }
    }

    /// 等待到绝对时间点 (unix 秒); 返回 true 表示收到停止信号
    pub async fn wait_until_timestamp(&mut self, target_ts: i64, now_ts: i64) -> bool {
        if target_ts <= now_ts {
            return self.is_shutdown();
        }
        self.wait(Duration::from_secs((target_ts - now_ts) as u64)).await
    }
}

/// 下一个 UTC 零点 (锚定绝对时间, 避免固定周期累积漂移)
pub fn next_midnight_utc(now_ts: i64) -> i64 {
    now_ts - now_ts.rem_euclid(SECS_PER_DAY) + SECS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_midnight_utc() {
        // 零点前一秒 -> 当天零点
        assert_eq!(next_midnight_utc(86_399), 86_400);
        // 恰好零点 -> 下一个零点
        assert_eq!(next_midnight_utc(86_400), 172_800);
        assert_eq!(next_midnight_utc(86_401), 172_800);
        assert_eq!(next_midnight_utc(0), 86_400);
    }

    #[tokio::test]
    async fn test_wait_elapses_without_signal() {
        let (_handle, mut shutdown) = shutdown_channel();
        let stopped = shutdown.wait(Duration::from_millis(10)).await;
        assert!(!stopped);
    }

    #[tokio::test]
    async fn test_wait_wakes_on_signal() {
        let (handle, mut shutdown) = shutdown_channel();

        let waiter = tokio::spawn(async move { shutdown.wait(Duration::from_secs(3600)).await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.shutdown();

        let stopped = waiter.await.unwrap();
        assert!(stopped);
    }

    #[tokio::test]
    async fn test_wait_after_signal_returns_immediately() {
        let (handle, mut shutdown) = shutdown_channel();
        handle.shutdown();
        assert!(shutdown.is_shutdown());
        assert!(shutdown.wait(Duration::from_secs(3600)).await);
    }

    #[tokio::test]
    async fn test_wait_until_past_target() {
        let (_handle, mut shutdown) = shutdown_channel();
        // 目标时间已过: 不等待
        assert!(!shutdown.wait_until_timestamp(100, 200).await);
    }
}
