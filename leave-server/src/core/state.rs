use std::sync::Arc;

use crate::auth::JwtService;
use crate::blob::FsBlobStore;
use crate::core::Config;
use crate::db::{LeaveRequestRepository, RecordStore, UserRepository, WorkLogRepository, seed};

/// Server state holding shared references to every service
///
/// `Clone` is shallow: everything shared sits behind an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    jwt_service: Arc<JwtService>,
    store: Arc<RecordStore>,
    blob_store: Arc<FsBlobStore>,
}

impl ServerState {
    /// Explicit startup initialization
    ///
    /// Creates the blob directory, builds the record store, and runs the
    /// idempotent seed routine. Safe to call against pre-existing state.
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        let blob_store = FsBlobStore::new(config.worklog_dir());
        blob_store.init()?;

        let state = Self {
            config: config.clone(),
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            store: Arc::new(RecordStore::new()),
            blob_store: Arc::new(blob_store),
        };

        seed::ensure_default_users(&state.users(), &config.seed_password)?;
        Ok(state)
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn blob_store(&self) -> &FsBlobStore {
        &self.blob_store
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.store.clone())
    }

    pub fn leave_requests(&self) -> LeaveRequestRepository {
        LeaveRequestRepository::new(self.store.clone())
    }

    pub fn work_logs(&self) -> WorkLogRepository {
        WorkLogRepository::new(self.store.clone())
    }
}
