use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use mocksmith::build_router;
use mocksmith::config::Config;
use mocksmith::handlers::{
    EndpointListResponse, EndpointResponse, MessageResponse, SyncResponse,
};
use mocksmith::handlers::generate::GenerateRequest;
use mocksmith::models::{
    EndpointSettings, ErrorType, HttpMethod, MockEndpoint, MockErrorResponse,
    MockRejectionResponse, MockSuccessResponse, SettingsPatch, UpdateEndpoint,
};
use mocksmith::handlers;
use mocksmith::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::generate::create_endpoint,
        handlers::generate::list_endpoints,
        handlers::endpoint::get_endpoint,
        handlers::endpoint::update_endpoint,
        handlers::endpoint::delete_endpoint,
        handlers::sync::sync_endpoints,
        handlers::sync::clear_endpoints,
    ),
    components(schemas(
        GenerateRequest,
        EndpointResponse,
        EndpointListResponse,
        MessageResponse,
        SyncResponse,
        MockEndpoint,
        EndpointSettings,
        SettingsPatch,
        UpdateEndpoint,
        HttpMethod,
        ErrorType,
        MockSuccessResponse,
        MockErrorResponse,
        MockRejectionResponse,
    )),
    tags(
        (name = "Generate", description = "Prompt-to-endpoint generation"),
        (name = "Endpoints", description = "Mock endpoint lifecycle"),
        (name = "Sync", description = "Bulk restore and clear")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (opens the endpoint store)
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI for the lifecycle API
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.unwrap();
}
