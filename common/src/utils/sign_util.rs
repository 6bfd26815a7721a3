use std::collections::BTreeMap;

use crate::constants::SIGN_FIELD;

/// 支付网关签名
///
/// 算法与网关约定一致, 不可改动:
/// 1. 剔除空值参数和签名字段本身
/// 2. 按参数名字典序排列, 拼接为 k1=v1&k2=v2...
/// 3. 末尾追加 &key={secret}
/// 4. MD5 后转大写
pub fn sign(params: &BTreeMap<String, String>, secret: &str) -> String {
    let joined = params
        .iter()
        .filter(|(k, v)| !v.is_empty() && k.as_str() != SIGN_FIELD)
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let to_sign = format!("{}&key={}", joined, secret);
    format!("{:x}", md5::compute(to_sign.as_bytes())).to_uppercase()
}

/// 校验参数中携带的签名
pub fn verify(params: &BTreeMap<String, String>, secret: &str) -> bool {
    match params.get(SIGN_FIELD) {
        Some(provided) if !provided.is_empty() => sign(params, secret) == *provided,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("order_no".to_string(), "CZ1700000000000001".to_string());
        params.insert("amount".to_string(), "50.00".to_string());
        params.insert("user_id".to_string(), "10001".to_string());
        params
    }

    #[test]
    fn test_sign_deterministic_uppercase_hex() {
        let params = base_params();
        let s1 = sign(&params, "secret");
        let s2 = sign(&params, "secret");
        assert_eq!(s1, s2);
        assert_eq!(s1.len(), 32);
        assert!(s1.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sign_skips_empty_and_sign_field() {
        let params = base_params();

        let mut with_noise = params.clone();
        with_noise.insert("memo".to_string(), String::new());
        with_noise.insert(SIGN_FIELD.to_string(), "ABCDEF".to_string());

        // 空值参数和 sign 字段不参与签名
        assert_eq!(sign(&params, "secret"), sign(&with_noise, "secret"));
    }

    #[test]
    fn test_verify_roundtrip() {
        let mut params = base_params();
        let s = sign(&params, "secret");
        params.insert(SIGN_FIELD.to_string(), s);
        assert!(verify(&params, "secret"));
        // 密钥不一致
        assert!(!verify(&params, "other-secret"));
    }

    #[test]
    fn test_verify_detects_tamper() {
        let mut params = base_params();
        let s = sign(&params, "secret");
        params.insert(SIGN_FIELD.to_string(), s);
        params.insert("amount".to_string(), "5000.00".to_string());
        assert!(!verify(&params, "secret"));
    }

    #[test]
    fn test_verify_missing_sign() {
        let params = base_params();
        assert!(!verify(&params, "secret"));
    }
}
