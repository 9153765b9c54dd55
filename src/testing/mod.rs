use async_trait::async_trait;
use axum::Router;
use chrono::{Duration, Utc};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::config::Environment;
use crate::database::models::{NewToothAttachment, NewTreatmentPlan, ToothAttachment, TreatmentPlan};
use crate::database::{DatabaseError, HealthProbe, ToothAttachmentStore, TreatmentPlanStore};
use crate::state::AppState;
use crate::storage::StorageRoot;

/// In-memory stand-in for the relational store.
///
/// Counts every call so tests can assert that rejected requests never reach
/// the store, and can be switched into an "unreachable" mode.
#[derive(Default)]
pub struct MemoryStore {
    plans: Mutex<Vec<TreatmentPlan>>,
    attachments: Mutex<Vec<ToothAttachment>>,
    calls: AtomicUsize,
    offline: bool,
}

impl MemoryStore {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<(), DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            Err(DatabaseError::Query("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TreatmentPlanStore for MemoryStore {
    async fn list_for_patient(&self, patient_id: &str) -> Result<Vec<TreatmentPlan>, DatabaseError> {
        self.enter()?;
        let mut plans: Vec<TreatmentPlan> = self
            .plans
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.patient_id == patient_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }

    async fn create(&self, plan: NewTreatmentPlan) -> Result<TreatmentPlan, DatabaseError> {
        self.enter()?;
        let mut plans = self.plans.lock().unwrap();
        // Space timestamps out so ordering is deterministic.
        let now = Utc::now() + Duration::milliseconds(plans.len() as i64);
        let record = TreatmentPlan {
            id: Uuid::new_v4(),
            patient_id: plan.patient_id,
            plan_name: plan.plan_name,
            plan_type: plan.plan_type,
            description: plan.description,
            duration: plan.duration,
            tooth_sequence: plan.tooth_sequence,
            total_phases: plan.total_phases,
            status: plan.status.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        plans.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl ToothAttachmentStore for MemoryStore {
    async fn list_for_transform(&self, transform_id: &str) -> Result<Vec<ToothAttachment>, DatabaseError> {
        self.enter()?;
        Ok(self
            .attachments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.transform_id == transform_id)
            .cloned()
            .collect())
    }

    async fn create(&self, attachment: NewToothAttachment) -> Result<ToothAttachment, DatabaseError> {
        self.enter()?;
        let now = Utc::now();
        let record = ToothAttachment {
            id: Uuid::new_v4(),
            transform_id: attachment.transform_id,
            attachment_type: attachment.attachment_type,
            attachment_code: attachment.attachment_code,
            material: attachment.material,
            color: attachment.color,
            archwire_slot: attachment.archwire_slot,
            position_x: attachment.position_x,
            position_y: attachment.position_y,
            position_z: attachment.position_z,
            is_active: attachment.is_active,
            created_at: now,
            updated_at: now,
        };
        self.attachments.lock().unwrap().push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.enter()
    }
}

/// Router over a memory store and a scratch storage root.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub storage_root: PathBuf,
}

impl TestApp {
    pub fn new(store: MemoryStore) -> Self {
        let storage_root =
            std::env::temp_dir().join(format!("dentit-test-{}", Uuid::new_v4().simple()));
        let store = Arc::new(store);
        let state = AppState {
            plans: store.clone(),
            attachments: store.clone(),
            health: store.clone(),
            storage: StorageRoot::new(storage_root.to_str(), &storage_root),
        };

        Self {
            router: crate::app(state, Environment::Development),
            store,
            storage_root,
        }
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.storage_root.join("uploads")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.storage_root);
    }
}
