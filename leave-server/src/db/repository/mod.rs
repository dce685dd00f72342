//! Per-entity repositories over the record store
//!
//! The lifecycle rules (status transitions, atomic approval, ownership
//! scoping) live here; handlers validate input and check roles, then call
//! into a repository.

mod leave_request;
mod user;
mod work_log;

pub use leave_request::LeaveRequestRepository;
pub use user::UserRepository;
pub use work_log::WorkLogRepository;
