use super::*;
use serde_json::json;

fn test_client(base_url: &str) -> JdClient {
    JdClient::with_base_url("test-key", "test-secret", 30, base_url)
        .expect("client construction should not fail")
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

// ---------------------------------------------------------------------------
// build_url
// ---------------------------------------------------------------------------

#[test]
fn build_url_carries_protocol_pairs() {
    let client = test_client("https://api.jd.com/routerjson");
    let url = client.build_url(&CatalogRequest::price("42"), "2026-01-01 08:00:00");

    assert_eq!(url.path(), "/routerjson");
    assert_eq!(
        query_value(&url, "method").as_deref(),
        Some("jingdong.ware.price.get")
    );
    assert_eq!(query_value(&url, "app_key").as_deref(), Some("test-key"));
    assert_eq!(
        query_value(&url, "timestamp").as_deref(),
        Some("2026-01-01 08:00:00")
    );
    assert_eq!(query_value(&url, "v").as_deref(), Some("2.0"));
    assert_eq!(query_value(&url, "sign_method").as_deref(), Some("md5"));

    let param_json = query_value(&url, "360buy_param_json").expect("param json present");
    let params: Value = serde_json::from_str(&param_json).expect("param json parses");
    assert_eq!(params, json!({ "sku_id": "J_42" }));
}

#[test]
fn build_url_carries_known_signature() {
    let client = test_client("https://api.jd.com/routerjson");
    let url = client.build_url(&CatalogRequest::price("42"), "2026-01-01 08:00:00");

    // MD5 of: test-secret 360buy_param_json{"sku_id":"J_42"} app_keytest-key
    // methodjingdong.ware.price.get sign_methodmd5
    // timestamp2026-01-01 08:00:00 v2.0 test-secret (no separators).
    assert_eq!(
        query_value(&url, "sign").as_deref(),
        Some("14630870F018C04863AB06B3BC022D18")
    );
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://api.jd.com/routerjson");
    let url = client.build_url(&CatalogRequest::search("a & b"), "2026-01-01 08:00:00");
    assert!(
        !url.as_str().contains("a & b"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = JdClient::with_base_url("k", "s", 30, "not a url");
    assert!(matches!(result, Err(ProviderError::InvalidBaseUrl { .. })));
}

// ---------------------------------------------------------------------------
// sign
// ---------------------------------------------------------------------------

#[test]
fn sign_is_order_independent_uppercase_hex() {
    let a = sign("s", &[("b", "2"), ("a", "1")]);
    let b = sign("s", &[("a", "1"), ("b", "2")]);
    assert_eq!(a, b);
    assert_eq!(a.len(), 32);
    assert!(a.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
}

#[test]
fn sign_matches_known_digest() {
    // MD5("sa1b2s")
    assert_eq!(
        sign("s", &[("b", "2"), ("a", "1")]),
        "5EE29085AF57D942F21F1C5BA3C2A90A"
    );
}

#[test]
fn sign_depends_on_secret() {
    let params = [("method", "jingdong.ware.search")];
    assert_ne!(sign("one", &params), sign("two", &params));
}

// ---------------------------------------------------------------------------
// unwrap_envelope
// ---------------------------------------------------------------------------

#[test]
fn unwrap_envelope_reads_method_response() {
    let body = json!({
        "jingdong_ware_price_get_response": {
            "code": "0",
            "price_changes": [{ "price": "9.90" }]
        }
    });
    let response = unwrap_envelope("jingdong.ware.price.get", body).unwrap();
    assert!(response.is_success());
    assert_eq!(response.payload["price_changes"][0]["price"], "9.90");
}

#[test]
fn unwrap_envelope_accepts_alternate_spelling() {
    let body = json!({ "jingdong_ware_search_responce": { "code": "0" } });
    let response = unwrap_envelope("jingdong.ware.search", body).unwrap();
    assert!(response.is_success());
}

#[test]
fn unwrap_envelope_reads_error_response_with_numeric_code() {
    let body = json!({ "error_response": { "code": 19, "zh_desc": "签名错误" } });
    let response = unwrap_envelope("jingdong.ware.search", body).unwrap();
    assert_eq!(response.code, "19");
    assert!(!response.is_success());
}

#[test]
fn unwrap_envelope_rejects_unknown_shapes() {
    for body in [
        json!([]),
        json!({ "something_else": {} }),
        json!({ "jingdong_ware_search_response": { "no_code": true } }),
    ] {
        let err = unwrap_envelope("jingdong.ware.search", body).unwrap_err();
        assert!(matches!(err, ProviderError::Envelope { .. }), "{err:?}");
    }
}

#[test]
fn router_timestamp_has_expected_shape() {
    let ts = router_timestamp();
    assert_eq!(ts.len(), 19);
    assert_eq!(&ts[4..5], "-");
    assert_eq!(&ts[10..11], " ");
    assert_eq!(&ts[13..14], ":");
}
