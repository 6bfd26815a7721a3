use rbatis::rbdc::datetime::DateTime;
use rbatis::{crud, impl_select};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 算力币账变记录表
///
/// 只追加: 与余额变更同一事务内写入, 创建后不更新不删除.
/// 每条记录快照一个资产池, 恒有 after_balance == before_balance + amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppCoinChange {
    pub id: Option<i64>,
    /// 流水号 (雪花ID)
    pub serial_no: Option<String>,
    pub user_id: i64,
    /// 资产池: 0 余额 / 1 冻结余额 / 2 合伙人余额
    pub asset_type: Option<i32>,
    /// 账变类型编码, 见 common::enums::CoinChangeType
    pub change_type: Option<i32>,
    /// 签名金额, 符号与账变类型方向一致
    pub amount: Option<Decimal>,
    /// 变更前快照
    pub before_balance: Option<Decimal>,
    /// 变更后快照
    pub after_balance: Option<Decimal>,
    pub remark: Option<String>,
    /// 关联充值订单
    pub order_id: Option<i64>,
    /// 调用方关联ID (例如 AI 任务), 不做自动去重
    pub task_id: Option<String>,
    /// 后台操作人, 仅后台调整时有值
    pub operator_id: Option<i64>,
    /// 账变类型名称 (冗余, 便于查询展示)
    pub change_type_name: Option<String>,
    pub create_time: Option<DateTime>,
}

crud!(AppCoinChange {}, "app_coin_change");
impl_select!(AppCoinChange{select_by_user_id(user_id: i64) =>
    "`where user_id = #{user_id} order by id desc`"});
impl_select!(AppCoinChange{select_by_order_id(order_id: i64) =>
    "`where order_id = #{order_id}`"});
impl_select!(AppCoinChange{select_by_task_id(task_id: &str, change_type: i32) =>
    "`where task_id = #{task_id} and change_type = #{change_type}`"});

impl AppCoinChange {
    pub const TABLE_NAME: &'static str = "app_coin_change";
}
