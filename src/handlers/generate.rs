use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::MockEndpoint;
use crate::services::generator;
use crate::state::AppState;

// ============ Request/Response DTOs ============

/// Wire shape of the generate request, for the OpenAPI document.
///
/// The handler reads the payload as raw `Value` instead of extracting
/// this type: a missing or non-string prompt must come back as a 400
/// with "Prompt is required", not axum's 422 deserialization reject.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Free-text description of the API to fake
    pub prompt: String,
    /// Optional user-supplied Gemini API key
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointResponse {
    pub success: bool,
    pub endpoint: MockEndpoint,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointListResponse {
    pub success: bool,
    pub endpoints: Vec<MockEndpoint>,
}

// ============ Handlers ============

/// Generate a mock endpoint from a prompt
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Endpoint generated and persisted", body = EndpointResponse),
        (status = 400, description = "Missing prompt or bad API key")
    ),
    tag = "Generate"
)]
pub async fn create_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<EndpointResponse>> {
    // Tolerate arbitrary payload shapes; only a string prompt is required
    let prompt = payload
        .get("prompt")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Validation("Prompt is required".to_string()))?;
    let user_key = payload.get("apiKey").and_then(Value::as_str);

    let data = generate_payload(&state, prompt, user_key).await?;
    let schema = generator::generate_schema(&data);

    let endpoint = MockEndpoint::new(
        prompt.to_string(),
        generator::derive_name(prompt),
        generator::derive_slug(prompt),
        data,
        schema,
    );

    let endpoint = state.store.create(endpoint).await?;
    tracing::info!(slug = %endpoint.slug, "Mock endpoint created");

    Ok(Json(EndpointResponse {
        success: true,
        endpoint,
    }))
}

/// Generate the payload, preferring Gemini when a key is available.
///
/// A failing user-supplied key surfaces as a 400; a failing server key
/// quietly falls back to the local generator.
async fn generate_payload(
    state: &AppState,
    prompt: &str,
    user_key: Option<&str>,
) -> AppResult<Value> {
    let key = user_key.or(state.config.gemini_api_key.as_deref());
    let Some(key) = key else {
        return Ok(generator::generate_data(prompt));
    };

    match state.gemini.generate(prompt, key).await {
        Ok(data) => Ok(data),
        Err(err) if user_key.is_some() => {
            tracing::warn!("Gemini generation with user key failed: {:#}", err);
            Err(AppError::Validation(
                "Invalid API key or Gemini API error. Please check your API key.".to_string(),
            ))
        }
        Err(err) => {
            tracing::warn!("Gemini generation failed, using local generator: {:#}", err);
            Ok(generator::generate_data(prompt))
        }
    }
}

/// List all mock endpoints, newest first
#[utoipa::path(
    get,
    path = "/api/endpoints",
    responses(
        (status = 200, description = "All endpoints", body = EndpointListResponse)
    ),
    tag = "Endpoints"
)]
pub async fn list_endpoints(
    State(state): State<AppState>,
) -> AppResult<Json<EndpointListResponse>> {
    let endpoints = state.store.list().await?;
    Ok(Json(EndpointListResponse {
        success: true,
        endpoints,
    }))
}
