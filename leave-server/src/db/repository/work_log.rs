//! Work-log submission repository
//!
//! A simpler lifecycle than leave requests: no approval signature, so
//! status updates move freely between the three states.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{WorkLogStatus, WorkLogSubmission};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::store::RecordStore;

/// Repository for work-log submissions
#[derive(Clone)]
pub struct WorkLogRepository {
    store: Arc<RecordStore>,
}

impl WorkLogRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Persist a validated submission
    pub fn create(&self, record: WorkLogSubmission) -> AppResult<WorkLogSubmission> {
        self.store.work_logs.insert(record.id, record.clone());
        Ok(record)
    }

    /// Fetch one submission
    pub fn get(&self, id: &Uuid) -> AppResult<WorkLogSubmission> {
        self.store
            .work_logs
            .get(id)
            .ok_or_else(|| AppError::new(ErrorCode::WorkLogNotFound))
    }

    /// All submissions, newest `created_at` first
    pub fn list_all(&self) -> Vec<WorkLogSubmission> {
        let mut records = self.store.work_logs.scan();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Unconditional status overwrite among the three states
    pub fn update_status(
        &self,
        id: &Uuid,
        new_status: WorkLogStatus,
    ) -> AppResult<WorkLogSubmission> {
        self.store
            .work_logs
            .update_with::<AppError>(id, |record| {
                record.status = new_status;
                Ok(())
            })?
            .ok_or_else(|| AppError::new(ErrorCode::WorkLogNotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repo() -> WorkLogRepository {
        WorkLogRepository::new(Arc::new(RecordStore::new()))
    }

    fn submission(hour: u32) -> WorkLogSubmission {
        WorkLogSubmission {
            id: Uuid::new_v4(),
            uploader_id: Uuid::new_v4(),
            file_name: "report.pdf".to_string(),
            stored_file_reference: format!("20250110-{:02}0000-report.pdf", hour),
            signature: "data:image/png;base64,AAAA".to_string(),
            status: WorkLogStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2025, 1, 10, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_list_ordering_newest_first() {
        let repo = repo();
        repo.create(submission(9)).unwrap();
        repo.create(submission(17)).unwrap();
        repo.create(submission(12)).unwrap();

        let hours: Vec<_> = repo
            .list_all()
            .iter()
            .map(|r| r.created_at.format("%H").to_string())
            .collect();
        assert_eq!(hours, vec!["17", "12", "09"]);
    }

    #[test]
    fn test_status_update_is_unconditional() {
        let repo = repo();
        let created = repo.create(submission(9)).unwrap();

        repo.update_status(&created.id, WorkLogStatus::Approved)
            .unwrap();
        // approved work logs may move back; there is no bookkeeping to
        // corrupt
        let back = repo
            .update_status(&created.id, WorkLogStatus::Pending)
            .unwrap();
        assert_eq!(back.status, WorkLogStatus::Pending);
    }

    #[test]
    fn test_missing_submission_not_found() {
        let repo = repo();
        let err = repo
            .update_status(&Uuid::new_v4(), WorkLogStatus::Approved)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WorkLogNotFound);
    }
}
