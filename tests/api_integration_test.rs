use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use flapi::adapters::metrics_handler::MetricsCollector;
use flapi::config::{RateLimitConfig, Settings};
use flapi::generator::INVALID_TYPE;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn app_with(settings: Settings) -> Router {
    let metrics = Arc::new(MetricsCollector::new().unwrap());
    flapi::create_app(Arc::new(settings), metrics)
}

fn app() -> Router {
    app_with(Settings::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_int_field_end_to_end() {
    let (status, body) = post(app(), "/gen", json!({"age": "int(len=2)"})).await;
    assert_eq!(status, StatusCode::OK);

    let docs = body.as_array().unwrap();
    assert_eq!(docs.len(), 1);
    let age = docs[0]["age"].as_i64().unwrap();
    assert!((10..=99).contains(&age));
}

#[tokio::test]
async fn test_bool_field_hundred_documents() {
    let (status, body) = post(app(), "/gen?amount=100", json!({"ok": "bool"})).await;
    assert_eq!(status, StatusCode::OK);

    let docs = body.as_array().unwrap();
    assert_eq!(docs.len(), 100);
    assert!(docs.iter().all(|d| d["ok"].is_boolean()));
    assert!(docs.iter().any(|d| d["ok"] == json!(true)));
    assert!(docs.iter().any(|d| d["ok"] == json!(false)));
}

#[tokio::test]
async fn test_unknown_type_is_not_an_error() {
    let (status, body) = post(app(), "/gen", json!({"x": "nonsense_type"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["x"], json!(INVALID_TYPE));
}

#[tokio::test]
async fn test_schema_from_query_parameter() {
    let schema = urlencoding::encode(r#"{"name":"name","tags":"list-str(amount=2)"}"#);
    let request = Request::builder()
        .uri(format!("/gen?amount=3&schema={}", schema))
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    let docs = body.as_array().unwrap();
    assert_eq!(docs.len(), 3);
    for doc in docs {
        assert!(doc["name"].is_string());
        assert_eq!(doc["tags"].as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_nested_repetition_end_to_end() {
    let schema = json!({
        "user": {"name": "name", "email": "email(domain=example.com)"},
        "orders": {"_$amount": 3, "id": "int(len=5)", "paid": "bool"}
    });
    let (status, body) = post(app(), "/gen?amount=2", schema).await;
    assert_eq!(status, StatusCode::OK);

    let docs = body.as_array().unwrap();
    assert_eq!(docs.len(), 2);
    for doc in docs {
        assert!(doc["user"]["email"].as_str().unwrap().ends_with("@example.com"));
        let orders = doc["orders"].as_array().unwrap();
        assert_eq!(orders.len(), 3);
        for order in orders {
            assert!((10_000..=99_999).contains(&order["id"].as_i64().unwrap()));
            assert!(order.get("_$amount").is_none());
        }
    }
}

#[tokio::test]
async fn test_seed_makes_response_reproducible() {
    let schema = json!({"id": "int(len=9)", "name": "name", "scores": "list-int(min=1$max=9)"});
    let (_, first) = post(app(), "/gen?amount=4&seed=1234", schema.clone()).await;
    let (_, second) = post(app(), "/gen?amount=4&seed=1234", schema).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_oversized_parameters_are_clamped() {
    let schema = json!({
        "bio": "description(words=18446744073709551615)",
        "token": "text(len=99999999999)",
        "age": "age(min=-5$max=0)"
    });
    let (status, body) = post(app(), "/gen", schema).await;
    assert_eq!(status, StatusCode::OK);

    let doc = &body[0];
    assert_eq!(doc["bio"].as_str().unwrap().split_whitespace().count(), 1000);
    assert_eq!(doc["token"].as_str().unwrap().len(), 1000);
    assert!((-5..=0).contains(&doc["age"].as_i64().unwrap()));
}

#[tokio::test]
async fn test_deep_repetition_is_truncated() {
    let mut settings = Settings::default();
    settings.generation.max_repeated_objects = 500;
    let schema = json!({
        "a": {"_$amount": 100, "b": {"_$amount": 100, "c": {"_$amount": 100,
            "d": {"_$amount": 100, "x": "bool"}}}}
    });

    let (status, body) = post(app_with(settings), "/gen?amount=100", schema).await;
    assert_eq!(status, StatusCode::OK);
    let docs = body.as_array().unwrap();
    assert_eq!(docs.len(), 100);
    // The whole budget goes to the first document, depth first.
    assert_eq!(docs[0]["a"].as_array().unwrap().len(), 100);
    assert_eq!(docs[99]["a"], json!([]));
}

#[tokio::test]
async fn test_amount_out_of_range() {
    for amount in ["0", "101", "abc", "-3"] {
        let (status, body) = post(app(), &format!("/gen?amount={}", amount), json!({"a": "bool"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "amount={amount}");
        assert_eq!(body["error"], "Amount must be between 1 and 100");
    }
}

#[tokio::test]
async fn test_missing_schema() {
    let request = Request::builder()
        .uri("/gen")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Schema is required");
}

#[tokio::test]
async fn test_invalid_schema() {
    let request = Request::builder()
        .uri("/gen")
        .method("POST")
        .body(Body::from("{\"age\": "))
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON schema");
}

#[tokio::test]
async fn test_configured_max_amount() {
    let mut settings = Settings::default();
    settings.generation.max_amount = 5;

    let (status, body) = post(app_with(settings), "/gen?amount=6", json!({"a": "bool"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Amount must be between 1 and 5");
}

#[tokio::test]
async fn test_rate_limit_applies_to_gen_only() {
    let mut settings = Settings::default();
    settings.rate_limit = Some(RateLimitConfig {
        enabled: true,
        requests_per_second: 1,
        burst_size: 1,
    });
    let app = app_with(settings);

    let (status, _) = post(app.clone(), "/gen", json!({"a": "bool"})).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = post(app.clone(), "/gen", json!({"a": "bool"})).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Rate limit exceeded");

    let request = Request::builder().uri("/health/live").body(Body::empty()).unwrap();
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_and_metrics() {
    let app = app();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    let (status, _) = post(app.clone(), "/gen?amount=2", json!({"x": "nope"})).await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(
        response.into_body().collect().await.unwrap().to_bytes().to_vec(),
    )
    .unwrap();
    assert!(text.contains("flapi_requests_total{status=\"200\"} 1"));
    assert!(text.contains("flapi_documents_generated_total 2"));
    assert!(text.contains("flapi_invalid_fields_total 2"));
}
