//! Pronoun CRUD handlers for the REST API.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use pronouns_types::id::PronounId;
use pronouns_types::pronoun::{CreatePronounRequest, Pronoun, UpdatePronounRequest};

use crate::http::error::AppError;
use crate::http::extractors::json::JsonBody;
use crate::http::handlers::parse_id;
use crate::http::response::{ApiResponse, RequestContext};
use crate::state::AppState;

fn self_link(id: &PronounId) -> String {
    format!("/api/v1/pronouns/{id}")
}

/// POST /api/v1/pronouns - Create a pronoun.
pub async fn create_pronoun(
    ctx: RequestContext,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreatePronounRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Pronoun>>), AppError> {
    let pronoun = state.pronoun_service.create_pronoun(body).await?;
    let link = self_link(&pronoun.id);
    let set_link = format!("/api/v1/pronoun-sets/{}", pronoun.pronoun_set_id);

    let resp = ctx
        .success(pronoun)
        .with_link("self", &link)
        .with_link("pronounSet", &set_link);
    Ok((StatusCode::CREATED, Json(resp)))
}

/// GET /api/v1/pronouns - List all pronouns, oldest first.
pub async fn list_pronouns(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Pronoun>>>, AppError> {
    let pronouns = state.pronoun_service.list_pronouns().await?;

    Ok(Json(ctx.success(pronouns).with_link("self", "/api/v1/pronouns")))
}

/// GET /api/v1/pronouns/{id} - Get one pronoun.
pub async fn get_pronoun(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Pronoun>>, AppError> {
    let id: PronounId = parse_id(&id, "pronoun")?;

    let pronoun = state.pronoun_service.get_pronoun(&id).await?;

    Ok(Json(ctx.success(pronoun).with_link("self", &self_link(&id))))
}

/// PUT /api/v1/pronouns/{id} - Partially update a pronoun.
pub async fn update_pronoun(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdatePronounRequest>,
) -> Result<Json<ApiResponse<Pronoun>>, AppError> {
    let id: PronounId = parse_id(&id, "pronoun")?;

    let pronoun = state.pronoun_service.update_pronoun(&id, body).await?;

    Ok(Json(ctx.success(pronoun).with_link("self", &self_link(&id))))
}

/// DELETE /api/v1/pronouns/{id} - Delete a pronoun.
pub async fn delete_pronoun(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: PronounId = parse_id(&id, "pronoun")?;
    state.pronoun_service.delete_pronoun(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
