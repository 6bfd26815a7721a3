use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};

/// 金额换算: 分(整数最小单位) <-> 元(两位小数)
///
/// 固定 100:1, 只做整数/定点运算, 禁止浮点

/// 分转元
pub fn fen_to_yuan(fen: i64) -> Decimal {
    Decimal::new(fen, 2)
}

/// 元转分
///
/// 金额精度超过分（例如 1.234 元）视为非法输入
pub fn yuan_to_fen(yuan: Decimal) -> AppResult<i64> {
    let fen = yuan * Decimal::from(100);
    if !fen.fract().is_zero() {
        return Err(AppError::ValidationError(format!("金额精度超过分: {}", yuan)));
    }
    fen.trunc()
        .to_i64()
        .ok_or_else(|| AppError::ValidationError(format!("金额超出范围: {}", yuan)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_fen_to_yuan() {
        assert_eq!(fen_to_yuan(12345), Decimal::from_str("123.45").unwrap());
        assert_eq!(fen_to_yuan(100), Decimal::from_str("1.00").unwrap());
        assert_eq!(fen_to_yuan(0), Decimal::ZERO);
        assert_eq!(fen_to_yuan(-250), Decimal::from_str("-2.50").unwrap());
    }

    #[test]
    fn test_yuan_to_fen() {
        assert_eq!(yuan_to_fen(Decimal::from_str("123.45").unwrap()).unwrap(), 12345);
        assert_eq!(yuan_to_fen(Decimal::from_str("1").unwrap()).unwrap(), 100);
        assert_eq!(yuan_to_fen(Decimal::from_str("-2.50").unwrap()).unwrap(), -250);
    }

    #[test]
    fn test_roundtrip() {
        for fen in [0i64, 1, 99, 100, 12345, 9_999_999] {
            assert_eq!(yuan_to_fen(fen_to_yuan(fen)).unwrap(), fen);
        }
    }

    #[test]
    fn test_sub_cent_rejected() {
        let result = yuan_to_fen(Decimal::from_str("1.234").unwrap());
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
