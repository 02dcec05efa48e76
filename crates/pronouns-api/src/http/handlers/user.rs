//! Account handlers. Every route requires a bearer token.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use pronouns_types::account::{AccountView, RegisterRequest, UpdateAccountRequest};
use pronouns_types::id::AccountId;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthenticatedAccount;
use crate::http::extractors::json::JsonBody;
use crate::http::handlers::parse_id;
use crate::http::response::{ApiResponse, RequestContext};
use crate::state::AppState;

fn self_link(id: &AccountId) -> String {
    format!("/api/v1/users/{id}")
}

/// GET /api/v1/users/me - The caller's own account.
pub async fn me(
    ctx: RequestContext,
    State(state): State<AppState>,
    AuthenticatedAccount(identity): AuthenticatedAccount,
) -> Result<Json<ApiResponse<AccountView>>, AppError> {
    let account = state.auth_service.current_account(&identity).await?;
    let link = self_link(&account.id);

    Ok(Json(ctx.success(account).with_link("self", &link)))
}

/// GET /api/v1/users - List accounts.
pub async fn list_users(
    ctx: RequestContext,
    State(state): State<AppState>,
    _auth: AuthenticatedAccount,
) -> Result<Json<ApiResponse<Vec<AccountView>>>, AppError> {
    let accounts = state.account_service.list_accounts().await?;

    Ok(Json(ctx.success(accounts).with_link("self", "/api/v1/users")))
}

/// POST /api/v1/users - Create an account on someone's behalf.
pub async fn create_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    _auth: AuthenticatedAccount,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountView>>), AppError> {
    let account = state.account_service.create_account(body).await?;
    let link = self_link(&account.id);

    Ok((StatusCode::CREATED, Json(ctx.success(account).with_link("self", &link))))
}

/// GET /api/v1/users/{id} - Get one account.
pub async fn get_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    _auth: AuthenticatedAccount,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AccountView>>, AppError> {
    let id: AccountId = parse_id(&id, "account")?;

    let account = state.account_service.get_account(&id).await?;

    Ok(Json(ctx.success(account).with_link("self", &self_link(&id))))
}

/// PUT /api/v1/users/{id} - Partially update an account.
pub async fn update_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    _auth: AuthenticatedAccount,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateAccountRequest>,
) -> Result<Json<ApiResponse<AccountView>>, AppError> {
    let id: AccountId = parse_id(&id, "account")?;

    let account = state.account_service.update_account(&id, body).await?;

    Ok(Json(ctx.success(account).with_link("self", &self_link(&id))))
}

/// DELETE /api/v1/users/{id} - Delete an account.
pub async fn delete_user(
    State(state): State<AppState>,
    _auth: AuthenticatedAccount,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: AccountId = parse_id(&id, "account")?;
    state.account_service.delete_account(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
