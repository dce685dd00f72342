//! Filesystem blob store
//!
//! Stand-in for the external blob storage collaborator: stores uploaded
//! work-log files under a configured root with collision-resistant,
//! timestamp-qualified names and returns the stored name as an opaque
//! reference.

use chrono::Utc;
use shared::error::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem-backed blob store
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the storage directory if it does not exist
    pub fn init(&self) -> AppResult<()> {
        fs::create_dir_all(&self.root)
            .map_err(|e| AppError::blob(format!("failed to create blob dir: {e}")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store bytes and return the opaque stored-file reference
    ///
    /// The stored name is `<timestamp>-<uuid prefix>-<sanitized original>`,
    /// so concurrent uploads of identically named files never collide.
    pub fn store(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        let qualifier = Uuid::new_v4().simple().to_string();
        let stored_name = format!(
            "{}-{}-{}",
            Utc::now().format("%Y%m%d%H%M%S"),
            &qualifier[..8],
            sanitize_file_name(original_name),
        );

        let path = self.root.join(&stored_name);
        fs::write(&path, bytes)
            .map_err(|e| AppError::blob(format!("failed to write blob: {e}")))?;

        Ok(stored_name)
    }

    /// Number of stored blobs, used by tests to assert no orphaned files
    pub fn count(&self) -> AppResult<usize> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| AppError::blob(format!("failed to read blob dir: {e}")))?;
        Ok(entries.count())
    }
}

/// Replace path-hostile characters, keeping letters (incl. Hangul), digits,
/// dots, dashes, and underscores
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
