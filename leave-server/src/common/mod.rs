//! Shared infrastructure

pub mod logger;
