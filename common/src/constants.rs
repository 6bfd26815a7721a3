/// 应用常量定义

/// 订单号序列 key 的过期时间（秒）
pub const ORDER_NO_SEQ_TTL_SECS: i64 = 60;

/// 订单号序列/随机后缀的位数上限 (6位)
pub const ORDER_NO_SUFFIX_MOD: i64 = 1_000_000;

/// 签名参数中签名字段本身的 key
pub const SIGN_FIELD: &str = "sign";
