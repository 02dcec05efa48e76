//! Pronoun set handlers for the REST API.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use pronouns_types::id::PronounSetId;
use pronouns_types::pronoun::{CreatePronounSetRequest, PronounSet, PronounSetDetail};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthenticatedAccount;
use crate::http::extractors::json::JsonBody;
use crate::http::handlers::parse_id;
use crate::http::response::{ApiResponse, RequestContext};
use crate::state::AppState;

/// POST /api/v1/pronoun-sets - Create a set.
pub async fn create_set(
    ctx: RequestContext,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreatePronounSetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PronounSet>>), AppError> {
    let set = state.pronoun_set_service.create_set(body).await?;
    let link = format!("/api/v1/pronoun-sets/{}", set.id);

    Ok((StatusCode::CREATED, Json(ctx.success(set).with_link("self", &link))))
}

/// GET /api/v1/pronoun-sets - List sets by name.
pub async fn list_sets(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PronounSet>>>, AppError> {
    let sets = state.pronoun_set_service.list_sets().await?;

    Ok(Json(ctx.success(sets).with_link("self", "/api/v1/pronoun-sets")))
}

/// GET /api/v1/pronoun-sets/{id} - A set with its pronouns.
pub async fn get_set(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PronounSetDetail>>, AppError> {
    let id: PronounSetId = parse_id(&id, "pronoun set")?;

    let detail = state.pronoun_set_service.get_set_detail(&id).await?;

    Ok(Json(
        ctx.success(detail)
            .with_link("self", &format!("/api/v1/pronoun-sets/{id}")),
    ))
}

/// DELETE /api/v1/pronoun-sets/{id} - Delete a set, its pronouns, and unlink accounts.
pub async fn delete_set(
    State(state): State<AppState>,
    AuthenticatedAccount(identity): AuthenticatedAccount,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: PronounSetId = parse_id(&id, "pronoun set")?;
    state.pronoun_set_service.delete_set(&id).await?;
    tracing::info!(set_id = %id, by = %identity.account_id, "pronoun set removed via API");
    Ok(StatusCode::NO_CONTENT)
}
