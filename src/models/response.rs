use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::{ErrorType, HttpMethod};

/// Successful mock response envelope, identical for every verb.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MockSuccessResponse {
    pub success: bool,
    pub data: Value,
    pub message: String,
    pub timestamp: String,
    pub method: HttpMethod,
    pub simulated_latency: u64,
}

/// Chaos-mode failure envelope. `simulated_error` distinguishes an
/// injected failure from a real one.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MockErrorResponse {
    pub success: bool,
    pub error: String,
    pub simulated_error: bool,
    pub error_type: ErrorType,
    pub timestamp: String,
}

/// Rejection before the chaos stage: unknown slug or disallowed verb.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MockRejectionResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_methods: Option<Vec<HttpMethod>>,
}
