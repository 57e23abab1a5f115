use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::chaos;
use crate::error::AppResult;
use crate::models::{
    iso_now, HttpMethod, MockErrorResponse, MockRejectionResponse, MockSuccessResponse,
};
use crate::state::AppState;

const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    (
        "access-control-allow-methods",
        "GET, POST, PUT, PATCH, DELETE, OPTIONS",
    ),
    ("access-control-allow-headers", "Content-Type, Authorization"),
];

/// Answer one request against a mock endpoint slug.
///
/// Linear state machine: resolve slug, check the method allow-list,
/// inject latency, maybe inject a failure, shape the method-specific
/// payload, attach custom and CORS headers. The endpoint record is a
/// snapshot taken at resolve time; concurrent lifecycle updates never
/// affect an in-flight dispatch.
pub async fn dispatch_mock(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    method: Method,
    body: Bytes,
) -> AppResult<Response> {
    // CORS preflight is slug-agnostic and ignores endpoint settings
    if method == Method::OPTIONS {
        return Ok(preflight_response());
    }

    let Some(verb) = HttpMethod::from_method(&method) else {
        return Ok((
            StatusCode::METHOD_NOT_ALLOWED,
            Json(json!({ "success": false, "error": "Method not supported" })),
        )
            .into_response());
    };

    let Some(endpoint) = state.store.get_by_slug(&slug).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(MockRejectionResponse {
                success: false,
                error: "Mock endpoint not found".to_string(),
                message: format!("No mock endpoint exists with slug: {}", slug),
                supported_methods: None,
            }),
        )
            .into_response());
    };
    let settings = &endpoint.settings;

    if !settings.supported_methods.contains(&verb) {
        return Ok((
            StatusCode::METHOD_NOT_ALLOWED,
            Json(MockRejectionResponse {
                success: false,
                error: "Method not allowed".to_string(),
                message: format!("This endpoint does not support {} requests", verb),
                supported_methods: Some(settings.supported_methods.clone()),
            }),
        )
            .into_response());
    }

    // Chaos: latency. tokio's sleep suspends only this request; other
    // in-flight dispatches overlap their delay windows freely.
    let delay = chaos::delay_for(settings);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    // Chaos: injected failure
    if chaos::should_fail(settings, state.random.as_ref()) {
        let (status, message) = chaos::error_for(settings.error_type);
        tracing::debug!(slug = %endpoint.slug, %status, "Simulated failure injected");
        return Ok((
            status,
            Json(MockErrorResponse {
                success: false,
                error: message.to_string(),
                simulated_error: true,
                error_type: settings.error_type,
                timestamp: iso_now(),
            }),
        )
            .into_response());
    }

    // Malformed or absent bodies are tolerated, never rejected
    let request_body: Option<Map<String, Value>> = if verb.has_body() {
        serde_json::from_slice::<Value>(&body)
            .ok()
            .and_then(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
    } else {
        None
    };

    let (data, message) = shape_response(verb, &endpoint.data, request_body);
    let envelope = MockSuccessResponse {
        success: true,
        data,
        message: message.to_string(),
        timestamp: iso_now(),
        method: verb,
        simulated_latency: settings.latency,
    };

    let mut response = Json(envelope).into_response();
    let headers = response.headers_mut();
    for (name, value) in &settings.custom_headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "Skipping invalid custom header"),
        }
    }
    for (name, value) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    Ok(response)
}

/// Method-specific payload and message for a successful mock response.
fn shape_response(
    verb: HttpMethod,
    stored: &Value,
    body: Option<Map<String, Value>>,
) -> (Value, &'static str) {
    match verb {
        HttpMethod::Get => (stored.clone(), "Data retrieved successfully"),
        HttpMethod::Post => {
            // Simulate a created resource: generated id, echoed body,
            // fresh createdAt (body keys may override the id)
            let mut data = Map::new();
            data.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
            if let Some(body) = body {
                data.extend(body);
            }
            data.insert("createdAt".to_string(), json!(iso_now()));
            (Value::Object(data), "Resource created successfully")
        }
        HttpMethod::Put | HttpMethod::Patch => {
            let mut data = body.unwrap_or_default();
            data.insert("updatedAt".to_string(), json!(iso_now()));
            let message = if verb == HttpMethod::Put {
                "Resource replaced successfully"
            } else {
                "Resource updated successfully"
            };
            (Value::Object(data), message)
        }
        HttpMethod::Delete => (Value::Null, "Resource deleted successfully"),
    }
}

/// Static CORS preflight response: always 204, regardless of endpoint
/// existence or settings.
pub fn preflight_response() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}
