use crate::models::dto::label::Label;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 用户等级枚举
///
/// 数据库存储字符串编码; 历史数据中仍存在 vip1/vip2/vip3 旧编码,
/// 解析时映射到对应的新等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum LevelCode {
    /// 普通用户
    #[strum(to_string = "普通用户")]
    Normal,
    /// VIP会员
    #[strum(to_string = "VIP会员")]
    Vip,
    /// SVIP会员
    #[strum(to_string = "SVIP会员")]
    Svip,
    /// 至尊会员
    #[strum(to_string = "至尊会员")]
    Max,
    /// 合伙人
    #[strum(to_string = "合伙人")]
    Partner,
}

impl LevelCode {
    /// 数据库编码
    pub fn get_code(self) -> &'static str {
        match self {
            LevelCode::Normal => "normal",
            LevelCode::Vip => "vip",
            LevelCode::Svip => "svip",
            LevelCode::Max => "max",
            LevelCode::Partner => "partner",
        }
    }

    /// 从数据库编码转换, 兼容旧编码
    pub fn from_code(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(LevelCode::Normal),
            "vip" | "vip1" => Some(LevelCode::Vip),
            "svip" | "vip2" => Some(LevelCode::Svip),
            "max" | "vip3" => Some(LevelCode::Max),
            "partner" => Some(LevelCode::Partner),
            _ => None,
        }
    }

    /// 获取描述
    pub fn description(&self) -> String {
        self.as_ref().to_string()
    }

    /// 是否为有到期时间的会员等级（到期扫描范围）
    pub fn is_vip_tier(self) -> bool {
        matches!(self, LevelCode::Vip | LevelCode::Svip | LevelCode::Max)
    }

    /// 每日对话次数
    pub fn chat_times(self) -> i32 {
        match self {
            LevelCode::Normal => 10,
            LevelCode::Vip => 100,
            LevelCode::Svip => 500,
            LevelCode::Max | LevelCode::Partner => -1, // 不限次
        }
    }

    /// 并行任务上限
    pub fn max_task(self) -> i32 {
        match self {
            LevelCode::Normal => 1,
            LevelCode::Vip => 3,
            LevelCode::Svip => 5,
            LevelCode::Max | LevelCode::Partner => 10,
        }
    }

    /// 是否开放高级智能体
    pub fn advanced_agent(self) -> bool {
        !matches!(self, LevelCode::Normal)
    }

    /// 获取所有枚举的 Label 列表
    pub fn all_labels() -> Vec<Label<String, String>> {
        Self::iter()
            .map(|e| Label {
                value: e.get_code().to_string(),
                label: e.description(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_with_legacy_alias() {
        assert_eq!(LevelCode::from_code("vip"), Some(LevelCode::Vip));
        assert_eq!(LevelCode::from_code("vip1"), Some(LevelCode::Vip));
        assert_eq!(LevelCode::from_code("vip2"), Some(LevelCode::Svip));
        assert_eq!(LevelCode::from_code("vip3"), Some(LevelCode::Max));
        assert_eq!(LevelCode::from_code("gold"), None);
    }

    #[test]
    fn test_vip_tier_range() {
        assert!(!LevelCode::Normal.is_vip_tier());
        assert!(LevelCode::Vip.is_vip_tier());
        assert!(LevelCode::Svip.is_vip_tier());
        assert!(LevelCode::Max.is_vip_tier());
        // 合伙人没有到期时间, 不在扫描范围内
        assert!(!LevelCode::Partner.is_vip_tier());
    }

    #[test]
    fn test_baseline_privileges() {
        assert_eq!(LevelCode::Normal.chat_times(), 10);
        assert_eq!(LevelCode::Normal.max_task(), 1);
        assert!(!LevelCode::Normal.advanced_agent());
        assert!(LevelCode::Vip.advanced_agent());
    }
}
