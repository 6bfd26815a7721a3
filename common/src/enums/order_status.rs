use crate::models::dto::label::Label;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 充值订单状态枚举
///
/// 状态机: 待支付 -> 已支付 | 已取消, 终态不再流转
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum OrderStatus {
    /// 待支付 (0)
    #[strum(to_string = "待支付")]
    Pending = 0,
    /// 已支付 (1)
    #[strum(to_string = "已支付")]
    Paid = 1,
    /// 已取消 (2)
    #[strum(to_string = "已取消")]
    Cancelled = 2,
}

impl OrderStatus {
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

    /// 是否为终态
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(OrderStatus::from_code(0), Some(OrderStatus::Pending));
        assert_eq!(OrderStatus::from_code(1), Some(OrderStatus::Paid));
        assert_eq!(OrderStatus::from_code(2), Some(OrderStatus::Cancelled));
        assert_eq!(OrderStatus::from_code(3), None);
    }

    #[test]
    fn test_terminal() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }
}
