use std::sync::Arc;

use sqlx::PgPool;

use crate::database::{
    HealthProbe, PgHealthProbe, PgToothAttachmentRepository, PgTreatmentPlanRepository,
    ToothAttachmentStore, TreatmentPlanStore,
};
use crate::storage::StorageRoot;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: the stores sit behind `Arc` and the storage root is a path.
#[derive(Clone)]
pub struct AppState {
    pub plans: Arc<dyn TreatmentPlanStore>,
    pub attachments: Arc<dyn ToothAttachmentStore>,
    pub health: Arc<dyn HealthProbe>,
    pub storage: StorageRoot,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: PgPool, storage: StorageRoot) -> Self {
        Self {
            plans: Arc::new(PgTreatmentPlanRepository::new(pool.clone())),
            attachments: Arc::new(PgToothAttachmentRepository::new(pool.clone())),
            health: Arc::new(PgHealthProbe::new(pool)),
            storage,
        }
    }
}
