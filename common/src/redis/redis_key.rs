//! Redis Key 常量定义
//!
//! 统一管理所有 Redis key，便于维护和查找

/// 订单相关 Key
pub mod order {
    /// 订单号秒级序列 (String, INCR + 60秒过期)
    /// 完整 key: order_no:seq:{unix秒时间戳}
    pub const ORDER_NO_SEQ_PREFIX: &str = "order_no:seq:";
}
