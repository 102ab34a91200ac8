//! API key check in front of the gated routes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use tracing::{trace, warn};

use crate::schemas::{API_KEY_HEADER, AppState, ErrorResponse};

/// Let the request through only if its `access_token` header equals the configured key.
pub async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let rejection = match request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        Some(key) if key == state.api_key => None,
        Some(_) => Some("a wrong"),
        None => Some("no"),
    };

    match rejection {
        None => {
            trace!("API key accepted");
            next.run(request).await
        }
        Some(reason) => {
            warn!("Rejected request to {} with {} API key", request.uri().path(), reason);
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new("INVALID_API_KEY", "Missing or invalid API key")),
    )
        .into_response()
}
