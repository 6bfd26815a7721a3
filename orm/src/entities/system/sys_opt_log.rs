use rbatis::rbdc::datetime::DateTime;
use rbatis::{crud, impl_select};
use serde::{Deserialize, Serialize};

/// 后台操作日志
///
/// 只追加, 与所记录的变更同一事务内写入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SysOptLog {
    pub id: Option<i64>,
    /// 操作人, NULL 表示系统触发 (例如到期降级)
    pub admin_user_id: Option<i64>,
    /// 被操作用户
    pub user_id: i64,
    /// 操作类型编码, 见 common::enums::OptType
    pub opt_type: Option<i32>,
    /// 操作明细 (OptDetail 序列化的 JSON)
    pub detail: Option<String>,
    pub remark: Option<String>,
    pub create_time: Option<DateTime>,
}

crud!(SysOptLog {}, "sys_opt_log");
impl_select!(SysOptLog{select_by_user_id(user_id: i64) =>
    "`where user_id = #{user_id} order by id desc`"});

impl SysOptLog {
    pub const TABLE_NAME: &'static str = "sys_opt_log";
}
