use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::database::models::{CreateTreatmentPlan, TreatmentPlan};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlansQuery {
    pub patient_id: Option<String>,
}

/// GET /plans?patientId=<id> - All plans of a patient, newest first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListPlansQuery>,
) -> ApiResult<Json<Vec<TreatmentPlan>>> {
    let patient_id = query
        .patient_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Patient ID required"))?;

    let plans = state.plans.list_for_patient(&patient_id).await?;
    Ok(Json(plans))
}

/// POST /plans - Create a plan in `DRAFT` status
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTreatmentPlan>, JsonRejection>,
) -> ApiResult<Json<TreatmentPlan>> {
    let Json(payload) = payload?;
    let new_plan = payload.validate()?;

    let plan = state.plans.create(new_plan).await?;
    info!("Created treatment plan {} for patient {}", plan.id, plan.patient_id);

    Ok(Json(plan))
}
