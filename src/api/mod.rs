use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::AppState;

pub mod handlers;

/// Build the API router. All routes are relative — the caller mounts this
/// under `/api`.
pub fn api_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/energy/summary", get(handlers::national_summary))
        .route("/energy/region/:name", get(handlers::region_summary))
        .route(
            "/energy/emissions/override",
            post(handlers::set_manual_emissions),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/generate-key", get(handlers::generate_key))
        .route("/energy/examples", get(handlers::example_usage))
        .merge(protected)
        .with_state(state)
}

/// Middleware: validates the `x-api-key` header against the token
/// authority. Expired keys are swept as a side effect of every check.
async fn require_api_key(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req.headers().get("x-api-key").and_then(|v| v.to_str().ok());

    match provided {
        Some(key) if state.tokens.validate(key) => Ok(next.run(req).await),
        Some(key) => {
            // SECURITY: never log the full key
            let masked = if key.len() > 8 {
                format!("{}…{}", &key[..4], &key[key.len() - 4..])
            } else {
                "****".to_string()
            };
            tracing::warn!("rejected invalid or expired API key '{}'", masked);
            Err(AppError::InvalidApiKey)
        }
        None => {
            tracing::warn!("rejected request missing x-api-key header");
            Err(AppError::InvalidApiKey)
        }
    }
}
