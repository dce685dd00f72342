//! Domain models

mod leave_request;
mod user;
mod work_log;

pub use leave_request::{Department, LeaveRequest, LeaveStatus, LeaveType, UnknownStatus};
pub use user::{Role, UnknownRole, User, UserInfo};
pub use work_log::{WorkLogStatus, WorkLogSubmission};
