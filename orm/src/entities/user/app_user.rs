use rbatis::rbdc::datetime::DateTime;
use rbatis::{crud, impl_select};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 用户表
///
/// 余额字段是账本子系统唯一需要加锁的共享资源,
/// 变更必须走 LedgerService, 不允许直接 update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUser {
    pub id: Option<i64>,
    pub user_account: Option<String>,
    pub nick_name: Option<String>,
    /// 可用余额 (算力币), 不变量: >= 0
    pub balance: Decimal,
    /// 冻结余额, 不变量: >= 0
    pub frozen_balance: Decimal,
    /// 合伙人余额 (独立资产池), 不变量: >= 0
    pub partner_balance: Decimal,
    /// 等级编码, 见 common::enums::LevelCode
    pub level_code: String,
    /// 会员到期时间, NULL 表示永久
    pub vip_expire_date: Option<DateTime>,
    /// 每日对话次数 (-1 不限)
    pub chat_times: Option<i32>,
    /// 并行任务上限
    pub max_task: Option<i32>,
    /// 是否开放高级智能体
    pub advanced_agent: Option<bool>,
    /// 账号冻结状态
    pub frozen: Option<bool>,
    pub create_time: Option<DateTime>,
    pub update_time: Option<DateTime>,
}

crud!(AppUser {}, "app_user");
impl_select!(AppUser{select_by_id(id: i64) -> Option => "`where id = #{id} limit 1`"});
impl_select!(AppUser{select_by_id_for_update(id: i64) -> Option => "`where id = #{id} limit 1 for update`"});
impl_select!(AppUser{select_expired_vip(now: &DateTime) =>
    "`where level_code in ('vip','svip','max','vip1','vip2','vip3') and vip_expire_date is not null and vip_expire_date < #{now}`"});

impl AppUser {
    pub const TABLE_NAME: &'static str = "app_user";
}
