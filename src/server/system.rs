//! Health, token refresh, caller identity and status catalog endpoints

use super::state::AppState;
use crate::core::auth::{RefreshTokenDto, TokenKind, TokenPair};
use crate::core::status::describe;
use crate::core::{
    AppError, AuthContext, EditRequestStatus, ExpenseOrderStatus, OrderStatus,
    RequestError, ValidatedJson, WorkOrderStatus,
};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde_json::{Value, json};

/// Routes reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/auth/refresh", post(refresh))
}

/// Routes behind the auth middleware
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/statuses", get(statuses))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /auth/refresh
async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RefreshTokenDto>,
) -> Result<Json<TokenPair>, AppError> {
    let claims = state.jwt.verify(&input.refresh_token, TokenKind::Refresh)?;
    let pair = state
        .jwt
        .issue_pair(&claims.sub, claims.name.as_deref(), &claims.roles)?;

    tracing::info!(user = %claims.sub, "token pair refreshed");
    Ok(Json(pair))
}

/// GET /auth/me
async fn me(auth: AuthContext) -> Result<Json<Value>, AppError> {
    let AuthContext::User {
        user_id,
        name,
        roles,
    } = auth
    else {
        return Err(RequestError::Unauthorized {
            message: "authentication required".to_string(),
        }
        .into());
    };
    Ok(Json(json!({
        "userId": user_id,
        "name": name,
        "roles": roles,
    })))
}

/// GET /statuses
async fn statuses() -> Json<Value> {
    Json(json!({
        "orderStatus": describe::<OrderStatus>(),
        "workOrderStatus": describe::<WorkOrderStatus>(),
        "expenseOrderStatus": describe::<ExpenseOrderStatus>(),
        "editRequestStatus": describe::<EditRequestStatus>(),
    }))
}
