use rbatis::rbdc::datetime::DateTime;
use rbatis::{crud, impl_select};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 充值订单表
///
/// 状态机: 待支付 -> 已支付 | 已取消.
/// 终态订单除追加备注外不再变更
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppRechargeOrder {
    pub id: Option<i64>,
    /// 订单号: {前缀}{unix秒}{6位序列}
    pub order_no: Option<String>,
    pub user_id: i64,
    /// 充值金额 (元)
    pub amount: Option<Decimal>,
    /// 支付状态编码, 见 common::enums::OrderStatus
    pub pay_status: Option<i32>,
    /// 待支付截止时间
    pub order_expire_time: Option<DateTime>,
    /// 支付到账时间
    pub pay_time: Option<DateTime>,
    pub remark: Option<String>,
    pub create_time: Option<DateTime>,
    pub update_time: Option<DateTime>,
}

crud!(AppRechargeOrder {}, "app_recharge_order");
impl_select!(AppRechargeOrder{select_by_order_no(order_no: &str) -> Option =>
    "`where order_no = #{order_no} limit 1`"});
impl_select!(AppRechargeOrder{select_by_order_no_for_update(order_no: &str) -> Option =>
    "`where order_no = #{order_no} limit 1 for update`"});
impl_select!(AppRechargeOrder{select_expired_pending(pending: i32, now: &DateTime) =>
    "`where pay_status = #{pending} and order_expire_time is not null and order_expire_time < #{now}`"});

impl AppRechargeOrder {
    pub const TABLE_NAME: &'static str = "app_recharge_order";
}
