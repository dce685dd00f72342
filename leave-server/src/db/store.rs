//! In-process record store
//!
//! The durable storage engine is an external collaborator; this store is
//! the in-process stand-in behind the repository APIs: keyed tables with
//! create/read/update by primary key and full scans.
//!
//! Each table is guarded by its own `RwLock`. [`Table::update_with`] holds
//! the write lock across the caller's read-check-then-write closure, which
//! is the single serialization point that keeps two concurrent approvals
//! from both passing the "not already Approved" check.

use parking_lot::RwLock;
use shared::models::{LeaveRequest, User, WorkLogSubmission};
use std::collections::HashMap;
use uuid::Uuid;

/// A keyed table of cloneable rows
///
/// Reads return copies, not live references; callers re-fetch to observe
/// later mutations.
#[derive(Debug)]
pub struct Table<T: Clone> {
    rows: RwLock<HashMap<Uuid, T>>,
}

impl<T: Clone> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a row under its primary key
    pub fn insert(&self, id: Uuid, row: T) {
        self.rows.write().insert(id, row);
    }

    /// Fetch a copy of a row
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.rows.read().get(id).cloned()
    }

    /// Copy out every row
    pub fn scan(&self) -> Vec<T> {
        self.rows.read().values().cloned().collect()
    }

    /// Copy out the first row matching the predicate
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<T> {
        self.rows.read().values().find(|row| pred(row)).cloned()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Mutate a row in place under the write lock
    ///
    /// The closure observes the current row and may refuse the mutation by
    /// returning an error; the lock is held for the whole check-and-write,
    /// so the transition is atomic with respect to other writers.
    ///
    /// Returns `Ok(None)` when no row exists for `id`.
    pub fn update_with<E>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut T) -> Result<(), E>,
    ) -> Result<Option<T>, E> {
        let mut rows = self.rows.write();
        match rows.get_mut(id) {
            Some(row) => {
                f(row)?;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }
}

impl<T: Clone> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// All tables of the service
#[derive(Debug, Default)]
pub struct RecordStore {
    pub users: Table<User>,
    pub leave_requests: Table<LeaveRequest>,
    pub work_logs: Table<WorkLogSubmission>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}
