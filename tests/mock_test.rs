mod common;

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::http::{Method, StatusCode};
use mocksmith::chaos::FixedRandom;
use mocksmith::models::{EndpointSettings, ErrorType, HttpMethod};
use serde_json::json;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_unknown_slug_returns_404() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/mock/no-such-slug").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Mock endpoint not found"));
    assert_eq!(
        body["message"],
        json!("No mock endpoint exists with slug: no-such-slug")
    );
}

#[tokio::test]
async fn test_unsupported_method_returns_405_with_allowed_set() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    // errorRate 100 proves the method check short-circuits before chaos
    factory
        .create_with_settings(
            "get-only",
            json!({"a": 1}),
            EndpointSettings {
                error_rate: 100,
                supported_methods: vec![HttpMethod::Get],
                ..Default::default()
            },
        )
        .await;

    let response = app.server.post("/api/mock/get-only").json(&json!({})).await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Method not allowed"));
    assert_eq!(body["supportedMethods"], json!(["GET"]));
    assert!(body.get("simulatedError").is_none());
}

#[tokio::test]
async fn test_get_returns_stored_data_verbatim() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let data = json!([{"id": 1, "name": "Widget"}, {"id": 2, "name": "Gadget"}]);
    factory.create_endpoint("widgets", data.clone()).await;

    for _ in 0..3 {
        let response = app.server.get("/api/mock/widgets").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"], data);
        assert_eq!(body["message"], json!("Data retrieved successfully"));
        assert_eq!(body["method"], json!("GET"));
        assert_eq!(body["simulatedLatency"], json!(0));
    }
}

#[tokio::test]
async fn test_post_echoes_body_with_generated_id_and_timestamp() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    factory.create_endpoint("widgets", json!([])).await;

    let response = app
        .server
        .post("/api/mock/widgets")
        .json(&json!({"name": "New Widget", "price": 9.5}))
        .await;

    // 200, not 201: the mock envelope is uniform across verbs
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], json!("Resource created successfully"));
    assert_eq!(body["data"]["name"], json!("New Widget"));
    assert_eq!(body["data"]["price"], json!(9.5));
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["createdAt"].is_string());
}

#[tokio::test]
async fn test_put_with_malformed_body_still_succeeds() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    factory.create_endpoint("widgets", json!([])).await;

    let response = app
        .server
        .put("/api/mock/widgets")
        .bytes(Bytes::from("{not json"))
        .content_type("application/json")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], json!("Resource replaced successfully"));
    // Only the injected timestamp; the malformed body is treated as absent
    let data = body["data"].as_object().unwrap();
    assert_eq!(data.len(), 1);
    assert!(data["updatedAt"].is_string());
}

#[tokio::test]
async fn test_patch_merges_body() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    factory.create_endpoint("widgets", json!([])).await;

    let response = app
        .server
        .patch("/api/mock/widgets")
        .json(&json!({"name": "Patched"}))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], json!("Resource updated successfully"));
    assert_eq!(body["data"]["name"], json!("Patched"));
    assert!(body["data"]["updatedAt"].is_string());
}

#[tokio::test]
async fn test_delete_always_returns_null_data() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    factory
        .create_endpoint("widgets", json!([{"id": 1}]))
        .await;

    let response = app.server.delete("/api/mock/widgets").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"], serde_json::Value::Null);
    assert_eq!(body["message"], json!("Resource deleted successfully"));
}

#[tokio::test]
async fn test_full_error_rate_always_fails_with_configured_type() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    factory
        .create_with_settings(
            "flaky",
            json!({"a": 1}),
            EndpointSettings {
                error_rate: 100,
                error_type: ErrorType::Timeout,
                ..Default::default()
            },
        )
        .await;

    for _ in 0..5 {
        let response = app.server.get("/api/mock/flaky").await;
        response.assert_status(StatusCode::REQUEST_TIMEOUT);

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["simulatedError"], json!(true));
        assert_eq!(body["errorType"], json!("timeout"));
        assert!(body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn test_zero_error_rate_never_fails() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    factory.create_endpoint("stable", json!({"a": 1})).await;

    for _ in 0..20 {
        let response = app.server.get("/api/mock/stable").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert!(body.get("simulatedError").is_none());
    }
}

#[tokio::test]
async fn test_error_rate_threshold_is_exact() {
    // sample 49.9 < rate 50: fails
    let app = TestApp::with_random(Arc::new(FixedRandom(49.9))).await;
    let factory = Factory::new(&app.state);
    factory
        .create_with_settings(
            "edge",
            json!({}),
            EndpointSettings {
                error_rate: 50,
                ..Default::default()
            },
        )
        .await;
    let response = app.server.get("/api/mock/edge").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    // sample 50.0 is not < rate 50: succeeds
    let app = TestApp::with_random(Arc::new(FixedRandom(50.0))).await;
    let factory = Factory::new(&app.state);
    factory
        .create_with_settings(
            "edge",
            json!({}),
            EndpointSettings {
                error_rate: 50,
                ..Default::default()
            },
        )
        .await;
    let response = app.server.get("/api/mock/edge").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_options_preflight_is_slug_agnostic() {
    let app = TestApp::new().await;

    let response = app
        .server
        .method(Method::OPTIONS, "/api/mock/does-not-exist")
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(
        response.header("access-control-allow-origin").to_str().unwrap(),
        "*"
    );
    assert_eq!(
        response.header("access-control-allow-methods").to_str().unwrap(),
        "GET, POST, PUT, PATCH, DELETE, OPTIONS"
    );
}

#[tokio::test]
async fn test_custom_and_cors_headers_on_success() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    factory
        .create_with_settings(
            "headed",
            json!({"a": 1}),
            EndpointSettings {
                custom_headers: [("X-Powered-By".to_string(), "mocksmith".to_string())]
                    .into_iter()
                    .collect(),
                ..Default::default()
            },
        )
        .await;

    let response = app.server.get("/api/mock/headed").await;
    response.assert_status_ok();
    assert_eq!(response.header("x-powered-by").to_str().unwrap(), "mocksmith");
    assert_eq!(
        response.header("access-control-allow-origin").to_str().unwrap(),
        "*"
    );
    assert_eq!(
        response.header("access-control-allow-headers").to_str().unwrap(),
        "Content-Type, Authorization"
    );
}

#[tokio::test]
async fn test_latency_applies_and_concurrent_delays_overlap() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    factory
        .create_with_settings(
            "slow",
            json!({"a": 1}),
            EndpointSettings {
                latency: 250,
                ..Default::default()
            },
        )
        .await;

    let start = Instant::now();
    let (first, second) = tokio::join!(
        app.server.get("/api/mock/slow"),
        app.server.get("/api/mock/slow")
    );
    let elapsed = start.elapsed();

    first.assert_status_ok();
    second.assert_status_ok();
    let body: serde_json::Value = first.json();
    assert_eq!(body["simulatedLatency"], json!(250));

    // Both waited out the delay, but their windows overlapped: two
    // serialized delays would need ~500ms
    assert!(elapsed.as_millis() >= 250, "elapsed {:?}", elapsed);
    assert!(elapsed.as_millis() < 450, "elapsed {:?}", elapsed);
}
