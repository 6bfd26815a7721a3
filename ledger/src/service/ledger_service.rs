use std::sync::Arc;

use rbatis::executor::RBatisTxExecutor;
use rbatis::rbdc::datetime::DateTime;
use rbatis::RBatis;
use rust_decimal::Decimal;

use common::enums::{AssetType, ChangeDirection, CoinChangeType, OptType};
use common::error::{AppError, AppResult};
use common::models::OptDetail;
use common::utils::snowflake;
use orm::entities::user::{AppCoinChange, AppUser};

use crate::service::opt_log_service::OptLogService;

/// 账变请求
#[derive(Debug, Clone)]
pub struct ChangeReq {
    // 必填字段（在new方法中已经设置）
    pub user_id: i64,
    pub change_type: CoinChangeType,
    /// 签名金额, 符号必须符合账变类型的方向
    pub amount: Decimal,

    // 可选字段（默认值见 new）
    /// 目标资产池, 默认可用余额; 冻结/解冻固定在余额<->冻结之间流转
    pub asset_type: AssetType,
    pub remark: Option<String>,
    pub order_id: Option<i64>,
    pub task_id: Option<String>,
    pub operator_id: Option<i64>,
}

impl ChangeReq {
    /// 创建新的账变请求, 接收所有必填参数
    pub fn new(user_id: i64, change_type: CoinChangeType, amount: Decimal) -> Self {
        Self {
            user_id,
            change_type,
            amount,
            asset_type: AssetType::Balance,
            remark: None,
            order_id: None,
            task_id: None,
            operator_id: None,
        }
    }

    /// 指定目标资产池 - 可选字段
    pub fn asset_type(mut self, asset_type: AssetType) -> Self {
        self.asset_type = asset_type;
        self
    }

    /// 设置备注 - 可选字段
    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// 关联充值订单 - 可选字段
    pub fn order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// 调用方关联ID - 可选字段
    pub fn task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// 后台操作人 - 可选字段, 有值时同事务写入操作日志
    pub fn operator_id(mut self, operator_id: i64) -> Self {
        self.operator_id = Some(operator_id);
        self
    }
}

/// 单个资产池上的一次变更计划
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPlan {
    pub asset_type: AssetType,
    pub amount: Decimal,
    pub before_balance: Decimal,
    pub after_balance: Decimal,
}

/// 校验并计算账变落在各资产池上的前后快照, 不做任何写入
///
/// 冻结/解冻在余额与冻结余额之间等额流转, 产生两条计划;
/// 其余类型只动一个资产池, 扣减不允许把资产池打成负数
pub fn plan_change(
    user: &AppUser,
    change_type: CoinChangeType,
    asset_type: AssetType,
    amount: Decimal,
) -> AppResult<Vec<EntryPlan>> {
    if amount == Decimal::ZERO {
        return Err(AppError::ValidationError("账变金额不能为0".to_string()));
    }
    match change_type.direction() {
        ChangeDirection::Positive if amount < Decimal::ZERO => {
            return Err(AppError::ValidationError(format!(
                "{} 类型金额必须为正: {}",
                change_type.description(),
                amount
            )));
        }
        ChangeDirection::Negative if amount > Decimal::ZERO => {
            return Err(AppError::ValidationError(format!(
                "{} 类型金额必须为负: {}",
                change_type.description(),
                amount
            )));
        }
        _ => {}
    }

    match change_type {
        // 冻结: amount 为负, 余额减少, 等额进入冻结余额
        CoinChangeType::Freeze => {
            let after_balance = user.balance + amount;
            if after_balance < Decimal::ZERO {
                return Err(AppError::InsufficientBalance);
            }
            Ok(vec![
                EntryPlan {
                    asset_type: AssetType::Balance,
                    amount,
                    before_balance: user.balance,
                    after_balance,
                },
                EntryPlan {
                    asset_type: AssetType::Frozen,
                    amount: -amount,
                    before_balance: user.frozen_balance,
                    after_balance: user.frozen_balance - amount,
                },
            ])
        }
        // 解冻: amount 为正, 冻结余额减少, 等额回到余额
        CoinChangeType::Unfreeze => {
            let after_frozen = user.frozen_balance - amount;
            if after_frozen < Decimal::ZERO {
                return Err(AppError::InsufficientFrozenBalance);
            }
            Ok(vec![
                EntryPlan {
                    asset_type: AssetType::Frozen,
                    amount: -amount,
                    before_balance: user.frozen_balance,
                    after_balance: after_frozen,
                },
                EntryPlan {
                    asset_type: AssetType::Balance,
                    amount,
                    before_balance: user.balance,
                    after_balance: user.balance + amount,
                },
            ])
        }
        _ => {
            let before_balance = match asset_type {
                AssetType::Balance => user.balance,
                AssetType::Frozen => user.frozen_balance,
                AssetType::Partner => user.partner_balance,
            };
            let after_balance = before_balance + amount;
            if after_balance < Decimal::ZERO {
                return Err(match asset_type {
                    AssetType::Frozen => AppError::InsufficientFrozenBalance,
                    _ => AppError::InsufficientBalance,
                });
            }
            Ok(vec![EntryPlan {
                asset_type,
                amount,
                before_balance,
                after_balance,
            }])
        }
    }
}

/// 把变更计划回写到用户快照
fn apply_plans(user: &mut AppUser, plans: &[EntryPlan]) {
    for plan in plans {
        match plan.asset_type {
            AssetType::Balance => user.balance = plan.after_balance,
            AssetType::Frozen => user.frozen_balance = plan.after_balance,
            AssetType::Partner => user.partner_balance = plan.after_balance,
        }
    }
}

/// 账本服务
///
/// 余额与账变记录的唯一写入方, 所有变更路径在此收口
pub struct LedgerService {
    rb: Arc<RBatis>,
}

impl LedgerService {
    pub fn new(rb: Arc<RBatis>) -> Self {
        Self { rb }
    }

    /// 执行一次账变, 自管事务
    ///
    /// 同一用户的并发账变通过行锁串行化; 校验失败不产生任何写入.
    /// 注意: 不做 task_id 去重, 相同 task_id 重复提交会产生两条账变,
    /// 至少一次投递的调用方需先用 AppCoinChange::select_by_task_id 查重
    pub async fn apply_mutation(&self, req: ChangeReq) -> AppResult<Vec<AppCoinChange>> {
        let tx = self.rb.acquire_begin().await?;
        match Self::balance_change(&tx, req).await {
            Ok(entries) => {
                tx.commit().await?;
                Ok(entries)
            }
            Err(e) => {
                let _ = tx.rollback().await;
                Err(e)
            }
        }
    }

    /// 余额变动（在调用方事务中执行）
    ///
    /// 余额更新、账变记录、操作日志同事务落库, 要么全部成功要么全部回滚
    pub async fn balance_change(
        tx: &RBatisTxExecutor,
        req: ChangeReq,
    ) -> AppResult<Vec<AppCoinChange>> {
        // 1. 行锁读取用户, 串行化同一用户的并发变更
        let mut user = AppUser::select_by_id_for_update(tx, req.user_id)
            .await?
            .ok_or(AppError::UserNotFound(req.user_id))?;

        // 2. 校验并生成变更计划, 校验不通过这里直接返回, 无任何写入
        let plans = plan_change(&user, req.change_type, req.asset_type, req.amount)?;

        // 3. 更新用户余额
        apply_plans(&mut user, &plans);
        user.update_time = Some(DateTime::now());
        AppUser::update_by_map(tx, &user, rbs::value! { "id": req.user_id }).await?;

        // 4. 每个触及的资产池写入一条账变记录
        let remark = req.remark.clone().unwrap_or_default();
        let mut entries = Vec::with_capacity(plans.len());
        for plan in &plans {
            let mut entry = AppCoinChange {
                id: None,
                serial_no: Some(snowflake::generate_id_string()),
                user_id: req.user_id,
                asset_type: Some(plan.asset_type.get_code()),
                change_type: Some(req.change_type.get_code()),
                amount: Some(plan.amount),
                before_balance: Some(plan.before_balance),
                after_balance: Some(plan.after_balance),
                remark: Some(remark.clone()),
                order_id: req.order_id,
                task_id: req.task_id.clone(),
                operator_id: req.operator_id,
                change_type_name: Some(req.change_type.description()),
                create_time: Some(DateTime::now()),
            };
            let res = AppCoinChange::insert(tx, &entry).await?;
            entry.id = res.last_insert_id.as_i64();
            entries.push(entry);
        }

        // 5. 后台操作同事务留痕
        if let Some(operator_id) = req.operator_id {
            let first = &plans[0];
            let (opt_type, detail) = if req.amount > Decimal::ZERO {
                (
                    OptType::Recharge,
                    OptDetail::Recharge {
                        amount: req.amount,
                        before_balance: first.before_balance,
                        after_balance: first.after_balance,
                    },
                )
            } else {
                (
                    OptType::Deduct,
                    OptDetail::Deduct {
                        amount: req.amount,
                        before_balance: first.before_balance,
                        after_balance: first.after_balance,
                    },
                )
            };
            OptLogService::create_log(
                tx,
                Some(operator_id),
                req.user_id,
                opt_type,
                &detail,
                req.remark.clone(),
            )
            .await?;
        }

        Ok(entries)
    }
}
