use crate::models::dto::label::Label;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 账变类型枚举
///
/// 编码符号与金额方向一致: 正码增加余额, 负码扣减余额
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum CoinChangeType {
    /// 充值 (888) - 订单支付到账
    #[strum(to_string = "充值")]
    Recharge = 888,
    /// 退款 (302)
    #[strum(to_string = "退款")]
    Refund = 302,
    /// 奖励 (303)
    #[strum(to_string = "奖励")]
    Reward = 303,
    /// 解冻 (304) - 扣除冻结余额，增加余额
    #[strum(to_string = "解冻")]
    Unfreeze = 304,
    /// 转入 (305)
    #[strum(to_string = "转入")]
    TransferIn = 305,
    /// 佣金 (306)
    #[strum(to_string = "佣金")]
    Commission = 306,
    /// 消费 (-301) - AI 任务扣费
    #[strum(to_string = "消费")]
    Consume = -301,
    /// 冻结 (-304) - 扣除余额，增加冻结余额
    #[strum(to_string = "冻结")]
    Freeze = -304,
    /// 转出 (-305)
    #[strum(to_string = "转出")]
    TransferOut = -305,
    /// 后台调整 (1) - 金额方向不限
    #[strum(to_string = "后台调整")]
    Adjustment = 1,
}

/// 账变的规范金额方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    /// 金额必须为正
    Positive,
    /// 金额必须为负
    Negative,
    /// 正负均可
    Either,
}

impl CoinChangeType {
    /// 转换为 i32 值
    pub fn get_code(self) -> i32 {
        self as i32
    }

    /// 从 i32 值转换
    pub fn from_code(value: i32) -> Option<Self> {
        for e in Self::iter() {
            if e.get_code() == value {
                return Some(e);
            }
        }
        None
    }

    /// 获取描述
    pub fn description(&self) -> String {
        self.as_ref().to_string()
    }

    /// 该类型允许的金额方向
    pub fn direction(self) -> ChangeDirection {
        match self {
            CoinChangeType::Adjustment => ChangeDirection::Either,
            _ => {
                if self.get_code() > 0 {
                    ChangeDirection::Positive
                } else {
                    ChangeDirection::Negative
                }
            }
        }
    }

    /// 获取所有枚举的 Label 列表
    pub fn all_labels() -> Vec<Label<i32, String>> {
        Self::iter()
            .map(|e| Label {
                value: e.get_code(),
                label: e.description(),
            })
            .collect()
    }
}

/// 资产池类型: 一条账变记录只快照一个资产池
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum AssetType {
    /// 可用余额
    #[strum(to_string = "余额")]
    Balance = 0,
    /// 冻结余额
    #[strum(to_string = "冻结余额")]
    Frozen = 1,
    /// 合伙人余额
    #[strum(to_string = "合伙人余额")]
    Partner = 2,
}

impl AssetType {
    pub fn get_code(self) -> i32 {
        self as i32
    }

    pub fn from_code(value: i32) -> Option<Self> {
        for e in Self::iter() {
            if e.get_code() == value {
                return Some(e);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_roundtrip() {
        for e in CoinChangeType::iter() {
            assert_eq!(CoinChangeType::from_code(e.get_code()), Some(e));
        }
        assert_eq!(CoinChangeType::from_code(0), None);
        assert_eq!(CoinChangeType::from_code(999), None);
    }

    #[test]
    fn test_direction_matches_code_sign() {
        assert_eq!(CoinChangeType::Recharge.direction(), ChangeDirection::Positive);
        assert_eq!(CoinChangeType::Unfreeze.direction(), ChangeDirection::Positive);
        assert_eq!(CoinChangeType::Consume.direction(), ChangeDirection::Negative);
        assert_eq!(CoinChangeType::Freeze.direction(), ChangeDirection::Negative);
        assert_eq!(CoinChangeType::TransferOut.direction(), ChangeDirection::Negative);
        assert_eq!(CoinChangeType::Adjustment.direction(), ChangeDirection::Either);
    }

    #[test]
    fn test_asset_type_from_code() {
        assert_eq!(AssetType::from_code(0), Some(AssetType::Balance));
        assert_eq!(AssetType::from_code(1), Some(AssetType::Frozen));
        assert_eq!(AssetType::from_code(2), Some(AssetType::Partner));
        assert_eq!(AssetType::from_code(3), None);
    }
}
