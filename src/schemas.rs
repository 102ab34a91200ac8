use crate::budget::NewBudget;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

/// Header carrying the API key on gated routes.
pub const API_KEY_HEADER: &str = "access_token";

/// What the budget endpoint answers when the database fails after the request
/// passed validation and the user lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PersistenceFailureMode {
    /// Respond with 500 and an [`ErrorResponse`].
    #[default]
    Surface,
    /// Respond with 200 and `{"budget_id": null}`, as older clients expect.
    NullBudgetId,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Key expected in the `access_token` header
    pub api_key: String,
    /// Response policy for unexpected database failures
    pub persistence_failure: PersistenceFailureMode,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("api_key", &"<redacted>")
            .field("persistence_failure", &self.persistence_failure)
            .finish()
    }
}

/// Response of a budget creation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBudgetResponse {
    /// Identifier of the new budget, `null` when it could not be created
    pub budget_id: Option<i32>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Registers the API key header scheme referenced by gated paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::budgets::create_budget,
    ),
    components(
        schemas(
            NewBudget,
            CreateBudgetResponse,
            ErrorResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "budgets", description = "Per-category spending budgets"),
    ),
    info(
        title = "Budgetbook API",
        description = "Personal finance tracker API - users, transactions, receipts and budgets",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
