use crate::auth::require_api_key;
use crate::handlers::{budgets::create_budget, health::health_check};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Routes behind the API key check
    let gated = Router::new()
        .route("/user/:user_id/budgets/", post(create_budget))
        .route("/user/:user_id/budgets", post(create_budget))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .merge(gated)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
