use serde_json::Value;

use crate::error::AffiliateError;

/// Envelope the sync endpoint wraps product-query results in
const QUERY_RESPONSE_ENVELOPE: &str = "aliexpress_affiliate_product_query_response";

/// Paths the product list is found under, relative to the envelope
const PRODUCT_PATHS: [&str; 2] = ["/resp_result/result/products", "/result/products"];

/// `error_response` field of a decoded body, as a typed error
pub fn upstream_error(body: &Value) -> Option<AffiliateError> {
    let error = body.get("error_response")?;

    let code = match error.get("code") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "unknown".to_string(),
    };
    let message = error
        .get("msg")
        .or_else(|| error.get("message"))
        .or_else(|| error.get("sub_msg"))
        .and_then(Value::as_str)
        .unwrap_or("no message")
        .to_string();

    Some(AffiliateError::Upstream {
        code,
        message,
        payload: body.clone(),
    })
}

/// Product records of a successful query, verbatim; empty when the path is absent
pub fn extract_products(body: &Value) -> Vec<Value> {
    let root = body.get(QUERY_RESPONSE_ENVELOPE).unwrap_or(body);

    let products = PRODUCT_PATHS.iter().find_map(|path| root.pointer(path));

    match products {
        Some(Value::Array(items)) => items.clone(),
        // Some API versions nest the array once more: `"products": {"product": [..]}`
        Some(Value::Object(map)) => map
            .get("product")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn resp_result_path() {
        let body = json!({"resp_result": {"result": {"products": [{"id": 1}]}}});
        assert_eq!(extract_products(&body), vec![json!({"id": 1})]);
    }

    #[test]
    fn result_path() {
        let body = json!({"result": {"products": [{"id": 1}, {"id": 2}]}});
        assert_eq!(extract_products(&body), vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn enveloped_and_nested_product_array() {
        let body = json!({
            "aliexpress_affiliate_product_query_response": {
                "resp_result": {
                    "resp_code": 200,
                    "result": {"products": {"product": [{"product_id": 42}]}}
                }
            }
        });
        assert_eq!(extract_products(&body), vec![json!({"product_id": 42})]);
    }

    #[test]
    fn missing_path_is_empty() {
        assert!(extract_products(&json!({})).is_empty());
        assert!(extract_products(&json!({"resp_result": {"result": {}}})).is_empty());
        assert!(extract_products(&json!({"result": {"products": null}})).is_empty());
    }

    #[test]
    fn error_response_is_detected() {
        let body = json!({"error_response": {"code": "IllegalAccessToken", "msg": "token expired"}});
        let err = upstream_error(&body).unwrap();
        assert!(err.is_token_error());
        assert_eq!(err.payload(), Some(&body));
        assert_eq!(err.to_string(), "Affiliate API error IllegalAccessToken: token expired");
    }

    #[test]
    fn numeric_error_code() {
        let body = json!({"error_response": {"code": 27, "msg": "Invalid session"}});
        assert!(upstream_error(&body).unwrap().is_token_error());

        let body = json!({"error_response": {"code": 15}});
        let err = upstream_error(&body).unwrap();
        assert!(!err.is_token_error());
        assert_eq!(err.to_string(), "Affiliate API error 15: no message");
    }

    #[test]
    fn success_has_no_error() {
        assert!(upstream_error(&json!({"result": {"products": []}})).is_none());
    }
}
