use rbatis::executor::RBatisTxExecutor;
use rbatis::rbdc::datetime::DateTime;

use common::enums::OptType;
use common::error::AppResult;
use common::models::OptDetail;
use orm::entities::system::SysOptLog;

/// 操作日志服务
///
/// 只追加; 始终在调用方事务内写入, 变更回滚时日志一并回滚
pub struct OptLogService;

impl OptLogService {
    /// 追加一条操作日志
    ///
    /// admin_user_id 为 None 表示系统触发（例如到期降级）
    pub async fn create_log(
        tx: &RBatisTxExecutor,
        admin_user_id: Option<i64>,
        user_id: i64,
        opt_type: OptType,
        detail: &OptDetail,
        remark: Option<String>,
    ) -> AppResult<SysOptLog> {
        let log_row = SysOptLog {
            id: None,
            admin_user_id,
            user_id,
            opt_type: Some(opt_type.get_code()),
            detail: Some(detail.to_json()?),
            remark,
            create_time: Some(DateTime::now()),
        };
        SysOptLog::insert(tx, &log_row).await?;
        Ok(log_row)
    }
}
