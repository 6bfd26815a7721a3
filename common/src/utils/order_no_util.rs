use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::{ORDER_NO_SEQ_TTL_SECS, ORDER_NO_SUFFIX_MOD};
use crate::redis::redis_key;
use crate::utils::redis_util::RedisUtil;

/// 订单号生成
///
/// 格式: {前缀}{unix秒时间戳}{6位序列}
/// 序列来自 Redis 对当前秒 key 的 INCR; Redis 不可用时降级为
/// 6位随机数, 唯一性为尽力而为

pub async fn generate(redis: &RedisUtil, prefix: &str) -> String {
    let ts = unix_now_secs();
    let key = format!("{}{}", redis_key::order::ORDER_NO_SEQ_PREFIX, ts);

    match redis.incr(&key).await {
        Ok(seq) => {
            // 秒级 key, 60秒后自动清理; 设置失败不影响订单号
            let _ = redis.expire(&key, ORDER_NO_SEQ_TTL_SECS).await;
            format_order_no(prefix, ts, seq)
        }
        Err(e) => {
            log::warn!("Redis 不可用, 订单号降级为随机后缀: {}", e);
            let suffix = rand::thread_rng().gen_range(0..ORDER_NO_SUFFIX_MOD);
            format_order_no(prefix, ts, suffix)
        }
    }
}

/// 拼接订单号, 后缀取模保证固定6位
pub fn format_order_no(prefix: &str, ts: i64, seq: i64) -> String {
    format!("{}{}{:06}", prefix, ts, seq.rem_euclid(ORDER_NO_SUFFIX_MOD))
}

fn unix_now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_order_no() {
        assert_eq!(format_order_no("CZ", 1700000000, 1), "CZ1700000000000001");
        assert_eq!(format_order_no("CZ", 1700000000, 999_999), "CZ1700000000999999");
    }

    #[test]
    fn test_suffix_fixed_width() {
        let no = format_order_no("CZ", 1700000000, 42);
        assert_eq!(no.len(), "CZ".len() + 10 + 6);
        assert!(no.ends_with("000042"));
    }

    #[test]
    fn test_suffix_wraps_at_million() {
        assert_eq!(format_order_no("CZ", 1700000000, 1_000_001), "CZ1700000000000001");
    }
}
