//! HTTP handlers for template operations.
//!
//! Every handler opens a fresh [`EngineSession`] — the catalog is rebuilt
//! from the store per request rather than shared across requests.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use stencil_core::{
    EngineSession, NewTemplate, RenderReply, SavedTemplate, Template, TemplateUpdate,
};

use crate::error::ApiResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Values to substitute into a template.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub values: HashMap<String, String>,
}

async fn open_session(state: &AppState) -> ApiResult<EngineSession> {
    Ok(EngineSession::open(state.store.clone()).await?)
}

/// `POST /templates`
pub async fn create_template(
    State(state): State<AppState>,
    Json(new): Json<NewTemplate>,
) -> ApiResult<(StatusCode, Json<DataResponse<SavedTemplate>>)> {
    let mut session = open_session(&state).await?;
    let saved = session.save_template(new).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(saved))))
}

/// `GET /templates`
pub async fn list_templates(
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<Template>>>> {
    let session = open_session(&state).await?;
    let templates = session.list_templates().await?;
    Ok(Json(DataResponse::new(templates)))
}

/// `GET /templates/{id}`
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DataResponse<Template>>> {
    let session = open_session(&state).await?;
    let template = session.get_template(id).await?;
    Ok(Json(DataResponse::new(template)))
}

/// `PUT /templates/{id}`
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<TemplateUpdate>,
) -> ApiResult<Json<DataResponse<SavedTemplate>>> {
    let mut session = open_session(&state).await?;
    let saved = session.update_template(id, update).await?;
    Ok(Json(DataResponse::new(saved)))
}

/// `DELETE /templates/{id}`
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DataResponse<Template>>> {
    let mut session = open_session(&state).await?;
    let deleted = session.delete_template(id).await?;
    Ok(Json(DataResponse::new(deleted)))
}

/// `POST /render/{name}`
///
/// Responds 200 for both outcomes: a completed render, or a missing-inputs
/// diagnostic listing what is required. Only an unknown name is a 404.
pub async fn render_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<RenderRequest>,
) -> ApiResult<Json<DataResponse<RenderReply>>> {
    let session = open_session(&state).await?;
    let reply = session.render_by_name(&name, &request.values)?;
    Ok(Json(DataResponse::new(reply)))
}

/// `GET /healthz`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
