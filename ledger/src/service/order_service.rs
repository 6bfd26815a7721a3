use std::collections::BTreeMap;
use std::sync::Arc;

use rbatis::executor::RBatisTxExecutor;
use rbatis::rbdc::datetime::DateTime;
use rbatis::RBatis;
use rust_decimal::Decimal;

use common::config::OrderConfig;
use common::enums::{CoinChangeType, OrderStatus};
use common::error::{AppError, AppResult};
use common::utils::amount_util;
use common::utils::order_no_util;
use common::utils::redis_util::RedisUtil;
use common::utils::sign_util;
use orm::entities::recharge::AppRechargeOrder;

use crate::service::ledger_service::{ChangeReq, LedgerService};

/// 充值订单服务
///
/// 订单状态机: 待支付 -> 已支付 | 已取消; 终态不再流转.
/// 支付确认是触发充值入账的唯一路径
pub struct OrderService {
    rb: Arc<RBatis>,
    redis: Arc<RedisUtil>,
    config: OrderConfig,
}

/// 解析订单状态编码
fn order_status(order: &AppRechargeOrder) -> AppResult<OrderStatus> {
    let code = order.pay_status.unwrap_or(-1);
    OrderStatus::from_code(code)
        .ok_or_else(|| AppError::BusinessError(format!("非法订单状态编码: {}", code)))
}

/// 待支付订单才允许确认支付
pub fn check_payable(order_no: &str, status: OrderStatus) -> AppResult<()> {
    match status {
        OrderStatus::Pending => Ok(()),
        _ => Err(AppError::OrderAlreadyTerminal {
            order_no: order_no.to_string(),
            status: status.description(),
        }),
    }
}

/// 待支付订单才允许取消
pub fn check_cancelable(order_no: &str, status: OrderStatus) -> AppResult<()> {
    match status {
        OrderStatus::Pending => Ok(()),
        _ => Err(AppError::OrderAlreadyTerminal {
            order_no: order_no.to_string(),
            status: status.description(),
        }),
    }
}

/// 过期取消时追加备注
pub fn append_expire_remark(remark: Option<String>) -> String {
    match remark {
        Some(r) if !r.is_empty() => format!("{}; 订单已过期", r),
        _ => "订单已过期".to_string(),
    }
}

impl OrderService {
    pub fn new(rb: Arc<RBatis>, redis: Arc<RedisUtil>, config: OrderConfig) -> Self {
        Self { rb, redis, config }
    }

    /// 创建充值订单
    pub async fn create_order(&self, user_id: i64, amount: Decimal) -> AppResult<AppRechargeOrder> {
        if amount <= Decimal::ZERO {
            return Err(AppError::ValidationError(format!(
                "充值金额必须为正: {}",
                amount
            )));
        }

        let order_no = order_no_util::generate(&self.redis, &self.config.order_no_prefix).await;
        let now = DateTime::now();
        let expire =
            DateTime::from_timestamp(now.unix_timestamp() + self.config.expire_minutes * 60);

        let mut order = AppRechargeOrder {
            id: None,
            order_no: Some(order_no.clone()),
            user_id,
            amount: Some(amount),
            pay_status: Some(OrderStatus::Pending.get_code()),
            order_expire_time: Some(expire),
            pay_time: None,
            remark: None,
            create_time: Some(now.clone()),
            update_time: Some(now),
        };
        let res = AppRechargeOrder::insert(self.rb.as_ref(), &order).await?;
        order.id = res.last_insert_id.as_i64();

        log::info!("创建充值订单: {} 用户 {} 金额 {}", order_no, user_id, amount);
        Ok(order)
    }

    /// 确认支付回调
    ///
    /// 先验签, 失败不触碰订单, 调用方可重试;
    /// 已支付订单幂等返回, 不会重复入账
    pub async fn confirm_payment(
        &self,
        order_no: &str,
        params: &BTreeMap<String, String>,
    ) -> AppResult<AppRechargeOrder> {
        if !sign_util::verify(params, &self.config.pay_secret) {
            log::warn!("订单 {} 支付回调验签失败", order_no);
            return Err(AppError::InvalidSignature);
        }

        // 回调金额为分(整数最小单位), 有值时必须与订单金额一致
        let callback_fen = match params.get("amount") {
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                AppError::ValidationError(format!("回调金额非法: {}", raw))
            })?),
            None => None,
        };

        let tx = self.rb.acquire_begin().await?;
        match Self::confirm_paid_tx(&tx, order_no, callback_fen).await {
            Ok(order) => {
                tx.commit().await?;
                Ok(order)
            }
            Err(e) => {
                let _ = tx.rollback().await;
                Err(e)
            }
        }
    }

    async fn confirm_paid_tx(
        tx: &RBatisTxExecutor,
        order_no: &str,
        callback_fen: Option<i64>,
    ) -> AppResult<AppRechargeOrder> {
        // 1. 行锁读取订单, 并发回调只有一个能推进状态
        let mut order = AppRechargeOrder::select_by_order_no_for_update(tx, order_no)
            .await?
            .ok_or_else(|| AppError::OrderNotFound(order_no.to_string()))?;

        let status = order_status(&order)?;
        // 2. 重复支付回调: 返回已结算订单, 不再入账
        if status == OrderStatus::Paid {
            log::info!("订单 {} 已支付, 幂等返回", order_no);
            return Ok(order);
        }
        check_payable(order_no, status)?;

        let amount = order
            .amount
            .ok_or_else(|| AppError::BusinessError(format!("订单 {} 缺少金额", order_no)))?;
        if let Some(fen) = callback_fen {
            if amount_util::yuan_to_fen(amount)? != fen {
                return Err(AppError::ValidationError(format!(
                    "订单 {} 回调金额 {} 与订单金额 {} 不一致",
                    order_no, fen, amount
                )));
            }
        }

        // 3. 流转到已支付
        let now = DateTime::now();
        order.pay_status = Some(OrderStatus::Paid.get_code());
        order.pay_time = Some(now.clone());
        order.update_time = Some(now);
        AppRechargeOrder::update_by_map(tx, &order, rbs::value! { "id": order.id }).await?;

        // 4. 同事务充值入账
        LedgerService::balance_change(
            tx,
            ChangeReq::new(order.user_id, CoinChangeType::Recharge, amount)
                .order_id(order.id.unwrap_or_default())
                .remark("充值到账"),
        )
        .await?;

        log::info!("订单 {} 支付确认, 用户 {} 入账 {}", order_no, order.user_id, amount);
        Ok(order)
    }

    /// 取消订单
    ///
    /// 重复取消已取消订单视为幂等无操作; 取消已支付订单是硬错误
    pub async fn cancel_order(&self, order_no: &str) -> AppResult<AppRechargeOrder> {
        let tx = self.rb.acquire_begin().await?;
        match Self::cancel_tx(&tx, order_no).await {
            Ok(order) => {
                tx.commit().await?;
                Ok(order)
            }
            Err(e) => {
                let _ = tx.rollback().await;
                Err(e)
            }
        }
    }

    async fn cancel_tx(tx: &RBatisTxExecutor, order_no: &str) -> AppResult<AppRechargeOrder> {
        let mut order = AppRechargeOrder::select_by_order_no_for_update(tx, order_no)
            .await?
            .ok_or_else(|| AppError::OrderNotFound(order_no.to_string()))?;

        let status = order_status(&order)?;
        if status == OrderStatus::Cancelled {
            return Ok(order);
        }
        check_cancelable(order_no, status)?;

        order.pay_status = Some(OrderStatus::Cancelled.get_code());
        order.update_time = Some(DateTime::now());
        AppRechargeOrder::update_by_map(tx, &order, rbs::value! { "id": order.id }).await?;

        log::info!("订单 {} 已取消", order_no);
        Ok(order)
    }

    /// 取消全部已过期的待支付订单, 返回取消数量
    ///
    /// 整批同一事务: 中途失败全部回滚, 下个周期重扫时
    /// pending 过滤条件会重新选中同一批订单, 重复执行安全.
    /// 过期取消不产生任何账变记录
    pub async fn expire_pending_orders(&self) -> AppResult<u64> {
        let tx = self.rb.acquire_begin().await?;
        match Self::expire_tx(&tx).await {
            Ok(count) => {
                tx.commit().await?;
                Ok(count)
            }
            Err(e) => {
                let _ = tx.rollback().await;
                Err(e)
            }
        }
    }

    async fn expire_tx(tx: &RBatisTxExecutor) -> AppResult<u64> {
        let now = DateTime::now();
        let expired =
            AppRechargeOrder::select_expired_pending(tx, OrderStatus::Pending.get_code(), &now)
                .await?;

        let mut count = 0u64;
        for mut order in expired {
            order.pay_status = Some(OrderStatus::Cancelled.get_code());
            order.remark = Some(append_expire_remark(order.remark.take()));
            order.update_time = Some(DateTime::now());
            AppRechargeOrder::update_by_map(tx, &order, rbs::value! { "id": order.id }).await?;
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_payable_and_cancelable() {
        assert!(check_payable("CZ1", OrderStatus::Pending).is_ok());
        assert!(check_cancelable("CZ1", OrderStatus::Pending).is_ok());
    }

    #[test]
    fn test_no_transition_out_of_terminal() {
        // 已支付订单不允许取消
        assert!(matches!(
            check_cancelable("CZ1", OrderStatus::Paid),
            Err(AppError::OrderAlreadyTerminal { .. })
        ));
        // 已取消订单不允许支付
        assert!(matches!(
            check_payable("CZ1", OrderStatus::Cancelled),
            Err(AppError::OrderAlreadyTerminal { .. })
        ));
    }

    #[test]
    fn test_append_expire_remark() {
        assert_eq!(append_expire_remark(None), "订单已过期");
        assert_eq!(append_expire_remark(Some(String::new())), "订单已过期");
        assert_eq!(
            append_expire_remark(Some("用户备注".to_string())),
            "用户备注; 订单已过期"
        );
    }
}
