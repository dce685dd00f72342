//! Leave request repository — the lifecycle state machine
//!
//! Status transitions:
//!
//! | From | To | Trigger |
//! |------|----|---------|
//! | — | Pending | create |
//! | Pending | Approved | approve-with-signature |
//! | Pending | Approved/Rejected/Canceled | generic status update |
//! | Approved | any | refused with Conflict (terminal on both paths) |
//!
//! `Approved` is terminal on the generic path as well as the approval
//! path, so approver bookkeeping can never be silently overwritten.

use chrono::{DateTime, Months, NaiveDate, Utc};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{LeaveRequest, LeaveStatus};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::store::RecordStore;

/// Repository for leave request records
#[derive(Clone)]
pub struct LeaveRequestRepository {
    store: Arc<RecordStore>,
}

impl LeaveRequestRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Persist a freshly validated request and return the stored record
    pub fn create(&self, record: LeaveRequest) -> AppResult<LeaveRequest> {
        self.store
            .leave_requests
            .insert(record.request_id, record.clone());
        Ok(record)
    }

    /// Fetch one record
    pub fn get(&self, request_id: &Uuid) -> AppResult<LeaveRequest> {
        self.store
            .leave_requests
            .get(request_id)
            .ok_or_else(|| AppError::new(ErrorCode::RequestNotFound))
    }

    /// All records, newest `date_requested` first
    pub fn list_all(&self) -> Vec<LeaveRequest> {
        let mut records = self.store.leave_requests.scan();
        records.sort_by(|a, b| b.date_requested.cmp(&a.date_requested));
        records
    }

    /// Records owned by `requester_id`, newest first
    pub fn list_mine(&self, requester_id: &Uuid) -> Vec<LeaveRequest> {
        let mut records: Vec<_> = self
            .store
            .leave_requests
            .scan()
            .into_iter()
            .filter(|r| r.requester_id == *requester_id)
            .collect();
        records.sort_by(|a, b| b.date_requested.cmp(&a.date_requested));
        records
    }

    /// Records whose `date_requested` falls within the last calendar month
    ///
    /// The boundary is exactly one month back from `today`, same-day
    /// inclusive.
    pub fn list_recent(&self, today: NaiveDate) -> Vec<LeaveRequest> {
        let cutoff = today
            .checked_sub_months(Months::new(1))
            .unwrap_or(NaiveDate::MIN);
        let mut records: Vec<_> = self
            .store
            .leave_requests
            .scan()
            .into_iter()
            .filter(|r| r.date_requested >= cutoff)
            .collect();
        records.sort_by(|a, b| b.date_requested.cmp(&a.date_requested));
        records
    }

    /// Generic status transition
    ///
    /// `Approved` is terminal: any update to a record currently in
    /// `Approved` is refused with Conflict.
    pub fn update_status(
        &self,
        request_id: &Uuid,
        new_status: LeaveStatus,
    ) -> AppResult<LeaveRequest> {
        self.store
            .leave_requests
            .update_with(request_id, |record| {
                if record.status == LeaveStatus::Approved {
                    return Err(AppError::conflict(
                        ErrorCode::RequestAlreadyApproved,
                        "Approved requests cannot change status",
                    ));
                }
                record.status = new_status;
                Ok(())
            })?
            .ok_or_else(|| AppError::new(ErrorCode::RequestNotFound))
    }

    /// Approval with signature
    ///
    /// Atomically (under the table's write lock) re-checks that the record
    /// is not already approved, then sets the status and all three approver
    /// fields together. Re-approval is not idempotent: a second call yields
    /// Conflict.
    pub fn approve(
        &self,
        request_id: &Uuid,
        approver_id: Uuid,
        approver_signature: String,
        approved_at: DateTime<Utc>,
    ) -> AppResult<LeaveRequest> {
        self.store
            .leave_requests
            .update_with(request_id, |record| {
                if record.status == LeaveStatus::Approved {
                    return Err(AppError::conflict(
                        ErrorCode::RequestAlreadyApproved,
                        "Leave request already approved",
                    ));
                }
                record.status = LeaveStatus::Approved;
                record.approver_signature = Some(approver_signature.clone());
                record.approver_id = Some(approver_id);
                record.approved_at = Some(approved_at);
                Ok(())
            })?
            .ok_or_else(|| AppError::new(ErrorCode::RequestNotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Department, LeaveType};

    fn repo() -> LeaveRequestRepository {
        LeaveRequestRepository::new(Arc::new(RecordStore::new()))
    }

    fn record(requester_id: Uuid, date_requested: NaiveDate) -> LeaveRequest {
        LeaveRequest {
            request_id: Uuid::new_v4(),
            requester_id,
            date_requested,
            emp_id: "E-100".to_string(),
            name: "김철수".to_string(),
            dept: Department::Development,
            position: "사원".to_string(),
            leave_type: LeaveType::Annual,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
            note: String::new(),
            handover_person: "이영희".to_string(),
            contact: "010-1234-5678".to_string(),
            status: LeaveStatus::Pending,
            requester_signature: "data:image/png;base64,AAAA".to_string(),
            approver_signature: None,
            approver_id: None,
            approved_at: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_list_all_ordering() {
        let repo = repo();
        let owner = Uuid::new_v4();
        repo.create(record(owner, day(2025, 1, 5))).unwrap();
        repo.create(record(owner, day(2025, 1, 20))).unwrap();
        repo.create(record(owner, day(2025, 1, 10))).unwrap();

        let dates: Vec<_> = repo.list_all().iter().map(|r| r.date_requested).collect();
        assert_eq!(dates, vec![day(2025, 1, 20), day(2025, 1, 10), day(2025, 1, 5)]);
    }

    #[test]
    fn test_list_mine_isolation() {
        let repo = repo();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        repo.create(record(alice, day(2025, 1, 5))).unwrap();
        repo.create(record(bob, day(2025, 1, 6))).unwrap();
        repo.create(record(alice, day(2025, 1, 7))).unwrap();

        let mine = repo.list_mine(&alice);
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.requester_id == alice));
    }

    #[test]
    fn test_list_recent_month_boundary() {
        let repo = repo();
        let owner = Uuid::new_v4();
        let today = day(2025, 3, 15);
        repo.create(record(owner, day(2025, 2, 15))).unwrap(); // exactly on boundary
        repo.create(record(owner, day(2025, 2, 14))).unwrap(); // one day too old
        repo.create(record(owner, day(2025, 3, 1))).unwrap();

        let recent = repo.list_recent(today);
        assert_eq!(recent.len(), 2);
        assert!(recent.iter().all(|r| r.date_requested >= day(2025, 2, 15)));
    }

    #[test]
    fn test_approve_sets_fields_atomically() {
        let repo = repo();
        let created = repo.create(record(Uuid::new_v4(), day(2025, 1, 5))).unwrap();
        let approver = Uuid::new_v4();
        let now = Utc::now();

        let approved = repo
            .approve(
                &created.request_id,
                approver,
                "data:image/png;base64,BBBB".to_string(),
                now,
            )
            .unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.approver_id, Some(approver));
        assert_eq!(approved.approved_at, Some(now));
        assert!(approved.approver_signature.is_some());
    }

    #[test]
    fn test_double_approval_conflicts() {
        let repo = repo();
        let created = repo.create(record(Uuid::new_v4(), day(2025, 1, 5))).unwrap();
        let sig = "data:image/png;base64,BBBB".to_string();

        repo.approve(&created.request_id, Uuid::new_v4(), sig.clone(), Utc::now())
            .unwrap();
        let err = repo
            .approve(&created.request_id, Uuid::new_v4(), sig, Utc::now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequestAlreadyApproved);
    }

    #[test]
    fn test_approved_is_terminal_on_generic_path() {
        let repo = repo();
        let created = repo.create(record(Uuid::new_v4(), day(2025, 1, 5))).unwrap();
        repo.approve(
            &created.request_id,
            Uuid::new_v4(),
            "data:image/png;base64,BBBB".to_string(),
            Utc::now(),
        )
        .unwrap();

        let err = repo
            .update_status(&created.request_id, LeaveStatus::Pending)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequestAlreadyApproved);
    }

    #[test]
    fn test_generic_update_from_pending() {
        let repo = repo();
        let created = repo.create(record(Uuid::new_v4(), day(2025, 1, 5))).unwrap();
        let updated = repo
            .update_status(&created.request_id, LeaveStatus::Rejected)
            .unwrap();
        assert_eq!(updated.status, LeaveStatus::Rejected);
        // no approver bookkeeping on the generic path
        assert!(updated.approver_id.is_none());
    }

    #[test]
    fn test_missing_record_not_found() {
        let repo = repo();
        let err = repo
            .update_status(&Uuid::new_v4(), LeaveStatus::Rejected)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequestNotFound);

        let err = repo
            .approve(
                &Uuid::new_v4(),
                Uuid::new_v4(),
                "data:image/png;base64,BBBB".to_string(),
                Utc::now(),
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequestNotFound);
    }
}
