use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::database::models::{CreateToothAttachment, ToothAttachment};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttachmentsQuery {
    pub transform_id: Option<String>,
}

/// GET /attachments?transformId=<id>
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListAttachmentsQuery>,
) -> ApiResult<Json<Vec<ToothAttachment>>> {
    let transform_id = query
        .transform_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Transform ID required"))?;

    let attachments = state.attachments.list_for_transform(&transform_id).await?;
    Ok(Json(attachments))
}

/// POST /attachments
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateToothAttachment>, JsonRejection>,
) -> ApiResult<Json<ToothAttachment>> {
    let Json(payload) = payload?;
    let new_attachment = payload.validate()?;

    let attachment = state.attachments.create(new_attachment).await?;
    info!(
        "Created {} attachment {} on transform {}",
        attachment.attachment_type, attachment.id, attachment.transform_id
    );

    Ok(Json(attachment))
}
