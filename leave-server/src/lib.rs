//! Leave & work-log submission server
//!
//! Employees submit leave requests and signed work-log files; managers
//! approve or reject them; HR and admin review recent activity. Every
//! mutation is gated by an explicit per-operation role check.

pub mod auth;
pub mod blob;
pub mod common;
pub mod core;
pub mod db;
pub mod handler;
pub mod routes;
pub mod validation;

pub use crate::core::{Config, Server, ServerState};

/// Set up the process environment: dotenv and logging
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    common::logger::init();
    Ok(())
}
