use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::handlers::generate::EndpointResponse;
use crate::models::UpdateEndpoint;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Get an endpoint by ID
#[utoipa::path(
    get,
    path = "/api/endpoints/{id}",
    params(("id" = String, Path, description = "Endpoint ID")),
    responses(
        (status = 200, description = "Endpoint details", body = EndpointResponse),
        (status = 404, description = "Endpoint not found")
    ),
    tag = "Endpoints"
)]
pub async fn get_endpoint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EndpointResponse>> {
    let endpoint = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Endpoint".to_string()))?;

    Ok(Json(EndpointResponse {
        success: true,
        endpoint,
    }))
}

/// Partially update an endpoint's data and/or settings
#[utoipa::path(
    put,
    path = "/api/endpoints/{id}",
    params(("id" = String, Path, description = "Endpoint ID")),
    request_body = UpdateEndpoint,
    responses(
        (status = 200, description = "Updated endpoint", body = EndpointResponse),
        (status = 400, description = "Invalid settings patch"),
        (status = 404, description = "Endpoint not found")
    ),
    tag = "Endpoints"
)]
pub async fn update_endpoint(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEndpoint>,
) -> AppResult<Json<EndpointResponse>> {
    let endpoint = state
        .store
        .update(&id, payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Endpoint".to_string()))?;

    Ok(Json(EndpointResponse {
        success: true,
        endpoint,
    }))
}

/// Delete an endpoint
#[utoipa::path(
    delete,
    path = "/api/endpoints/{id}",
    params(("id" = String, Path, description = "Endpoint ID")),
    responses(
        (status = 200, description = "Endpoint deleted", body = MessageResponse),
        (status = 404, description = "Endpoint not found")
    ),
    tag = "Endpoints"
)]
pub async fn delete_endpoint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !state.store.delete(&id).await? {
        return Err(AppError::NotFound("Endpoint".to_string()));
    }

    tracing::info!(%id, "Mock endpoint deleted");
    Ok(Json(MessageResponse {
        success: true,
        message: "Endpoint deleted".to_string(),
    }))
}
