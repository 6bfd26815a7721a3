use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// 后台操作明细
///
/// 每种操作类型携带自己的前后快照字段, 内存中强类型,
/// 落库时序列化为 JSON 文本列
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptDetail {
    /// 后台充值
    Recharge {
        amount: Decimal,
        before_balance: Decimal,
        after_balance: Decimal,
    },
    /// 后台扣减
    Deduct {
        amount: Decimal,
        before_balance: Decimal,
        after_balance: Decimal,
    },
    /// 修改等级（含到期降级）
    ChangeLevel {
        before_level: String,
        after_level: String,
        before_expire: Option<String>,
        after_expire: Option<String>,
        /// 降级时清零的合伙人余额
        cleared_partner_balance: Decimal,
    },
    /// 修改状态
    ChangeStatus {
        before_frozen: bool,
        after_frozen: bool,
    },
    /// 重置密码
    ResetPassword {},
}

impl OptDetail {
    /// 序列化为 JSON 字符串（落库格式）
    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string(self).map_err(|e| AppError::ValidationError(e.to_string()))
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_tagged_json_roundtrip() {
        let detail = OptDetail::ChangeLevel {
            before_level: "svip".to_string(),
            after_level: "normal".to_string(),
            before_expire: Some("2025-01-01 00:00:00".to_string()),
            after_expire: None,
            cleared_partner_balance: Decimal::from_str("12.50").unwrap(),
        };
        let json = detail.to_json().unwrap();
        assert!(json.contains("\"type\":\"change_level\""));
        assert_eq!(OptDetail::from_json(&json).unwrap(), detail);
    }

    #[test]
    fn test_deduct_snapshot_fields() {
        let detail = OptDetail::Deduct {
            amount: Decimal::from_str("-30.00").unwrap(),
            before_balance: Decimal::from_str("100.00").unwrap(),
            after_balance: Decimal::from_str("70.00").unwrap(),
        };
        let json = detail.to_json().unwrap();
        assert!(json.contains("\"type\":\"deduct\""));
        let parsed = OptDetail::from_json(&json).unwrap();
        assert_eq!(parsed, detail);
    }
}
