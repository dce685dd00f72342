//! Record store and repositories

pub mod repository;
pub mod seed;
pub mod store;

pub use repository::{LeaveRequestRepository, UserRepository, WorkLogRepository};
pub use store::RecordStore;
