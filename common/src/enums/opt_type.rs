use crate::models::dto::label::Label;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 后台操作类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum OptType {
    /// 后台充值 (1)
    #[strum(to_string = "后台充值")]
    Recharge = 1,
    /// 后台扣减 (2)
    #[strum(to_string = "后台扣减")]
    Deduct = 2,
    /// 修改等级 (3)
    #[strum(to_string = "修改等级")]
    ChangeLevel = 3,
    /// 修改状态 (4)
    #[strum(to_string = "修改状态")]
    ChangeStatus = 4,
    /// 重置密码 (5)
    #[strum(to_string = "重置密码")]
    ResetPassword = 5,
}

impl OptType {
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
