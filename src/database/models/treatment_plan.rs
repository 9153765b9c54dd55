use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use super::{missing_fields, non_empty, MissingFields};

/// Lifecycle of a plan. New plans always start as `DRAFT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    #[default]
    Draft,
    Active,
    Completed,
    Cancelled,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "DRAFT",
            PlanStatus::Active => "ACTIVE",
            PlanStatus::Completed => "COMPLETED",
            PlanStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlan {
    pub id: Uuid,
    pub patient_id: String,
    pub plan_name: String,
    pub plan_type: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    /// JSON text of the ordered tooth list, as submitted.
    pub tooth_sequence: Option<String>,
    pub total_phases: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /plans`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTreatmentPlan {
    pub patient_id: Option<String>,
    pub plan_name: Option<String>,
    pub plan_type: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub tooth_sequence: Option<Value>,
    pub total_phases: Option<i32>,
}

/// A validated plan ready to be inserted, defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTreatmentPlan {
    pub patient_id: String,
    pub plan_name: String,
    pub plan_type: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub tooth_sequence: Option<String>,
    pub total_phases: i32,
    pub status: PlanStatus,
}

impl CreateTreatmentPlan {
    pub const REQUIRED: &'static [&'static str] = &["patientId", "planName", "planType"];
    pub const DEFAULT_TOTAL_PHASES: i32 = 1;

    pub fn validate(self) -> Result<NewTreatmentPlan, MissingFields> {
        let patient_id = non_empty(self.patient_id);
        let plan_name = non_empty(self.plan_name);
        let plan_type = non_empty(self.plan_type);

        match (patient_id, plan_name, plan_type) {
            (Some(patient_id), Some(plan_name), Some(plan_type)) => Ok(NewTreatmentPlan {
                patient_id,
                plan_name,
                plan_type,
                description: self.description,
                duration: self.duration,
                tooth_sequence: serialize_sequence(self.tooth_sequence),
                total_phases: self.total_phases.unwrap_or(Self::DEFAULT_TOTAL_PHASES),
                status: PlanStatus::Draft,
            }),
            (patient_id, plan_name, plan_type) => Err(missing_fields(
                Self::REQUIRED,
                &[patient_id.is_some(), plan_name.is_some(), plan_type.is_some()],
            )),
        }
    }
}

fn serialize_sequence(sequence: Option<Value>) -> Option<String> {
    match sequence {
        None | Some(Value::Null) => None,
        // Value's Display is its compact JSON form.
        Some(value) => Some(value.to_string()),
    }
}
