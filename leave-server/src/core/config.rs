use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
///
/// Every item can be overridden through environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/leave-server | Working directory (blobs, data) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development / staging / production |
/// | SEED_PASSWORD | changeme | Initial password for seeded accounts |
/// | JWT_SECRET | dev-only key | Token signing secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding uploaded work-log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Password assigned to seeded default accounts
    pub seed_password: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/leave-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            seed_password: std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "changeme".into()),
        }
    }

    /// Directory where uploaded work-log blobs are stored
    pub fn worklog_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("worklogs")
    }
}
