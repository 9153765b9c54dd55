//! Narrow persistence interface consumed by the handlers, plus the
//! PostgreSQL implementations backing it.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewToothAttachment, NewTreatmentPlan, ToothAttachment, TreatmentPlan};

#[async_trait]
pub trait TreatmentPlanStore: Send + Sync {
    /// All plans of a patient, newest first.
    async fn list_for_patient(&self, patient_id: &str) -> Result<Vec<TreatmentPlan>, DatabaseError>;

    async fn create(&self, plan: NewTreatmentPlan) -> Result<TreatmentPlan, DatabaseError>;
}

#[async_trait]
pub trait ToothAttachmentStore: Send + Sync {
    async fn list_for_transform(&self, transform_id: &str) -> Result<Vec<ToothAttachment>, DatabaseError>;

    async fn create(&self, attachment: NewToothAttachment) -> Result<ToothAttachment, DatabaseError>;
}

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub struct PgTreatmentPlanRepository {
    pool: PgPool,
}

impl PgTreatmentPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TreatmentPlanStore for PgTreatmentPlanRepository {
    async fn list_for_patient(&self, patient_id: &str) -> Result<Vec<TreatmentPlan>, DatabaseError> {
        let plans = sqlx::query_as::<_, TreatmentPlan>(
            r#"
            SELECT id, patient_id, plan_name, plan_type, description, duration,
                   tooth_sequence, total_phases, status, created_at, updated_at
            FROM treatment_plans
            WHERE patient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    async fn create(&self, plan: NewTreatmentPlan) -> Result<TreatmentPlan, DatabaseError> {
        sqlx::query_as::<_, TreatmentPlan>(
            r#"
            INSERT INTO treatment_plans
                (id, patient_id, plan_name, plan_type, description, duration,
                 tooth_sequence, total_phases, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, patient_id, plan_name, plan_type, description, duration,
                      tooth_sequence, total_phases, status, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&plan.patient_id)
        .bind(&plan.plan_name)
        .bind(&plan.plan_type)
        .bind(&plan.description)
        .bind(&plan.duration)
        .bind(&plan.tooth_sequence)
        .bind(plan.total_phases)
        .bind(plan.status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::Query("insert into treatment_plans returned no row".to_string()))
    }
}

pub struct PgToothAttachmentRepository {
    pool: PgPool,
}

impl PgToothAttachmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ToothAttachmentStore for PgToothAttachmentRepository {
    async fn list_for_transform(&self, transform_id: &str) -> Result<Vec<ToothAttachment>, DatabaseError> {
        let attachments = sqlx::query_as::<_, ToothAttachment>(
            r#"
            SELECT id, transform_id, attachment_type, attachment_code, material, color,
                   archwire_slot, position_x, position_y, position_z, is_active,
                   created_at, updated_at
            FROM tooth_attachments
            WHERE transform_id = $1
            "#,
        )
        .bind(transform_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attachments)
    }

    async fn create(&self, attachment: NewToothAttachment) -> Result<ToothAttachment, DatabaseError> {
        sqlx::query_as::<_, ToothAttachment>(
            r#"
            INSERT INTO tooth_attachments
                (id, transform_id, attachment_type, attachment_code, material, color,
                 archwire_slot, position_x, position_y, position_z, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, transform_id, attachment_type, attachment_code, material, color,
                      archwire_slot, position_x, position_y, position_z, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&attachment.transform_id)
        .bind(&attachment.attachment_type)
        .bind(&attachment.attachment_code)
        .bind(&attachment.material)
        .bind(&attachment.color)
        .bind(&attachment.archwire_slot)
        .bind(attachment.position_x)
        .bind(attachment.position_y)
        .bind(attachment.position_z)
        .bind(attachment.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::Query("insert into tooth_attachments returned no row".to_string()))
    }
}

pub struct PgHealthProbe {
    pool: PgPool,
}

impl PgHealthProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgHealthProbe {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
