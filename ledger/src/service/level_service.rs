use std::sync::Arc;

use rbatis::executor::RBatisTxExecutor;
use rbatis::rbdc::datetime::DateTime;
use rbatis::RBatis;
use rbs::to_value;
use rust_decimal::Decimal;

use common::enums::{AssetType, CoinChangeType, LevelCode, OptType};
use common::error::{AppError, AppResult};
use common::models::OptDetail;
use orm::entities::user::AppUser;

use crate::service::ledger_service::{ChangeReq, LedgerService};
use crate::service::opt_log_service::OptLogService;

/// 会员等级服务
///
/// 到期降级的唯一入口; 余额相关副作用走 LedgerService
pub struct LevelService {
    rb: Arc<RBatis>,
}

/// 降级计划
#[derive(Debug, Clone, PartialEq)]
pub struct DowngradePlan {
    pub before_level: LevelCode,
    /// 降级时清零的合伙人余额, 政策: 作废不退款
    pub cleared_partner_balance: Decimal,
}

/// 计算降级计划; 返回 None 表示无需降级 (幂等)
pub fn downgrade_plan(user: &AppUser) -> Option<DowngradePlan> {
    let level = LevelCode::from_code(&user.level_code)?;
    if !level.is_vip_tier() {
        return None;
    }
    Some(DowngradePlan {
        before_level: level,
        cleared_partner_balance: if user.partner_balance > Decimal::ZERO {
            user.partner_balance
        } else {
            Decimal::ZERO
        },
    })
}

impl LevelService {
    pub fn new(rb: Arc<RBatis>) -> Self {
        Self { rb }
    }

    /// 查找会员已到期的用户 (扫描谓词: 会员等级 + 到期时间已过)
    pub async fn find_expired_vips(&self) -> AppResult<Vec<AppUser>> {
        let now = DateTime::now();
        Ok(AppUser::select_expired_vip(self.rb.as_ref(), &now).await?)
    }

    /// 会员到期降级
    ///
    /// 重置等级到基础档并清除等级特权; 返回 false 表示用户已是
    /// 基础等级, 重复调用为无操作
    pub async fn handle_user_downgrade(&self, user_id: i64) -> AppResult<bool> {
        let tx = self.rb.acquire_begin().await?;
        match Self::downgrade_tx(&tx, user_id).await {
            Ok(changed) => {
                tx.commit().await?;
                Ok(changed)
            }
            Err(e) => {
                let _ = tx.rollback().await;
                Err(e)
            }
        }
    }

    async fn downgrade_tx(tx: &RBatisTxExecutor, user_id: i64) -> AppResult<bool> {
        let user = AppUser::select_by_id_for_update(tx, user_id)
            .await?
            .ok_or(AppError::UserNotFound(user_id))?;

        let Some(plan) = downgrade_plan(&user) else {
            return Ok(false);
        };

        let before_expire = user.vip_expire_date.as_ref().map(|d| d.to_string());

        // 合伙人余额作废走账本, 让清零本身可追溯
        if plan.cleared_partner_balance > Decimal::ZERO {
            LedgerService::balance_change(
                tx,
                ChangeReq::new(
                    user_id,
                    CoinChangeType::Adjustment,
                    -plan.cleared_partner_balance,
                )
                .asset_type(AssetType::Partner)
                .remark("会员到期, 合伙人余额清零"),
            )
            .await?;
        }

        // 回到基础档: vip_expire_date 置空必须显式写 null
        let baseline = LevelCode::Normal;
        tx.exec(
            "update app_user set level_code = ?, vip_expire_date = null, chat_times = ?, max_task = ?, advanced_agent = ?, update_time = ? where id = ?",
            vec![
                to_value!(baseline.get_code()),
                to_value!(baseline.chat_times()),
                to_value!(baseline.max_task()),
                to_value!(baseline.advanced_agent()),
                to_value!(DateTime::now()),
                to_value!(user_id),
            ],
        )
        .await?;

        let detail = OptDetail::ChangeLevel {
            before_level: plan.before_level.get_code().to_string(),
            after_level: baseline.get_code().to_string(),
            before_expire,
            after_expire: None,
            cleared_partner_balance: plan.cleared_partner_balance,
        };
        OptLogService::create_log(
            tx,
            None,
            user_id,
            OptType::ChangeLevel,
            &detail,
            Some("会员到期自动降级".to_string()),
        )
        .await?;

        log::info!(
            "用户 {} 会员到期, {} 降级为 {}",
            user_id,
            plan.before_level.get_code(),
            baseline.get_code()
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn user_with_level(level: &str, partner: &str) -> AppUser {
        AppUser {
            id: Some(1),
            user_account: Some("u10001".to_string()),
            nick_name: None,
            balance: Decimal::ZERO,
            frozen_balance: Decimal::ZERO,
            partner_balance: Decimal::from_str(partner).unwrap(),
            level_code: level.to_string(),
            vip_expire_date: None,
            chat_times: Some(100),
            max_task: Some(3),
            advanced_agent: Some(true),
            frozen: Some(false),
            create_time: None,
            update_time: None,
        }
    }

    #[test]
    fn test_downgrade_plan_for_vip() {
        let plan = downgrade_plan(&user_with_level("vip", "0")).unwrap();
        assert_eq!(plan.before_level, LevelCode::Vip);
        assert_eq!(plan.cleared_partner_balance, Decimal::ZERO);
    }

    #[test]
    fn test_downgrade_plan_idempotent_on_baseline() {
        // 已是基础等级: 再次降级无操作
        assert!(downgrade_plan(&user_with_level("normal", "0")).is_none());
        // 合伙人没有到期时间, 不参与降级
        assert!(downgrade_plan(&user_with_level("partner", "50.00")).is_none());
        // 未知编码不做任何动作
        assert!(downgrade_plan(&user_with_level("gold", "0")).is_none());
    }

    #[test]
    fn test_downgrade_plan_legacy_alias() {
        let plan = downgrade_plan(&user_with_level("vip2", "0")).unwrap();
        assert_eq!(plan.before_level, LevelCode::Svip);
    }

    #[test]
    fn test_downgrade_plan_forfeits_partner_balance() {
        let plan = downgrade_plan(&user_with_level("max", "88.00")).unwrap();
        assert_eq!(
            plan.cleared_partner_balance,
            Decimal::from_str("88.00").unwrap()
        );
    }
}
