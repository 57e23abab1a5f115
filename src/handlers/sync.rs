use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::handlers::endpoint::MessageResponse;
use crate::models::MockEndpoint;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct SyncResponse {
    pub success: bool,
    pub message: String,
    pub synced: usize,
}

/// Restore externally held endpoint records into the store
///
/// Records need at least `id`, `slug` and `data`; malformed entries are
/// skipped silently and do not count toward `synced`.
#[utoipa::path(
    post,
    path = "/api/sync",
    responses(
        (status = 200, description = "Records written", body = SyncResponse),
        (status = 400, description = "Body is not an endpoint array")
    ),
    tag = "Sync"
)]
pub async fn sync_endpoints(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<SyncResponse>> {
    let entries = payload
        .get("endpoints")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::Validation("Endpoints must be an array".to_string()))?;

    let mut synced = 0;
    for entry in entries {
        match serde_json::from_value::<MockEndpoint>(entry.clone()) {
            Ok(endpoint) => {
                state.store.create(endpoint).await?;
                synced += 1;
            }
            Err(err) => {
                tracing::debug!("Skipping malformed sync entry: {}", err);
            }
        }
    }

    tracing::info!(synced, total = entries.len(), "Endpoint sync completed");
    Ok(Json(SyncResponse {
        success: true,
        message: format!("Synced {} endpoints to server", synced),
        synced,
    }))
}

/// Remove every endpoint from the store
#[utoipa::path(
    delete,
    path = "/api/sync",
    responses(
        (status = 200, description = "Store emptied", body = MessageResponse)
    ),
    tag = "Sync"
)]
pub async fn clear_endpoints(
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    state.store.clear().await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "All endpoints cleared from server".to_string(),
    }))
}
