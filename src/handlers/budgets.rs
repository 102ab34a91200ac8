use crate::budget::{self, BudgetError, NewBudget};
use crate::schemas::{AppState, CreateBudgetResponse, ErrorResponse, PersistenceFailureMode};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error, info, instrument, trace, warn};

/// Create a budget for a user
#[utoipa::path(
    post,
    path = "/user/{user_id}/budgets/",
    tag = "budgets",
    params(
        ("user_id" = i32, Path, description = "Owning user ID"),
    ),
    request_body = NewBudget,
    responses(
        (status = 200, description = "Budget created; `budget_id` is null only in the lenient failure mode", body = CreateBudgetResponse),
        (status = 400, description = "A category amount is negative", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Budget could not be stored", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
#[instrument(skip(state, request))]
pub async fn create_budget(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<NewBudget>,
) -> Result<Json<CreateBudgetResponse>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_budget handler for user_id: {}", user_id);
    debug!("Budget amounts: {:?}", request);

    match budget::create_budget(&state.db, user_id, &request).await {
        Ok(budget_id) => {
            info!("Created budget {} for user {}", budget_id, user_id);
            Ok(Json(CreateBudgetResponse {
                budget_id: Some(budget_id),
            }))
        }
        Err(err @ BudgetError::InvalidAmount { .. }) => {
            warn!("Rejected budget for user {}: {}", user_id, err);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("INVALID_BUDGET", err.to_string())),
            ))
        }
        Err(err @ BudgetError::UserNotFound(_)) => {
            warn!("Rejected budget: {}", err);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("USER_NOT_FOUND", err.to_string())),
            ))
        }
        Err(BudgetError::Database(db_error)) => {
            error!("Failed to create budget for user {}: {}", user_id, db_error);
            match state.persistence_failure {
                PersistenceFailureMode::Surface => Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(
                        "BUDGET_NOT_CREATED",
                        "Could not create budget",
                    )),
                )),
                PersistenceFailureMode::NullBudgetId => {
                    Ok(Json(CreateBudgetResponse { budget_id: None }))
                }
            }
        }
    }
}
