//! Registration and login handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use pronouns_types::account::{AccountView, RegisterRequest};
use pronouns_types::auth::{IssuedToken, LoginRequest};

use crate::http::error::AppError;
use crate::http::extractors::json::JsonBody;
use crate::http::response::{ApiResponse, RequestContext};
use crate::state::AppState;

/// POST /api/v1/auth/register - Create an account.
pub async fn register(
    ctx: RequestContext,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountView>>), AppError> {
    let account = state.auth_service.register(body).await?;

    let resp = ctx
        .success(account)
        .with_link("login", "/api/v1/auth/login")
        .with_link("me", "/api/v1/users/me");
    Ok((StatusCode::CREATED, Json(resp)))
}

/// POST /api/v1/auth/login - Exchange credentials for a bearer token.
pub async fn login(
    ctx: RequestContext,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<IssuedToken>>, AppError> {
    let issued = state.auth_service.login(body).await?;

    Ok(Json(ctx.success(issued).with_link("me", "/api/v1/users/me")))
}
