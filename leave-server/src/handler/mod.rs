//! HTTP handlers
//!
//! Each handler checks the caller's role against the operation's explicit
//! allowed-role set, validates the payload, then calls into a repository.

pub mod auth;
pub mod leave_request;
pub mod work_log;
