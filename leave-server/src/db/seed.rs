//! Idempotent startup seeding
//!
//! An explicit sequence of "ensure this account exists" steps run once at
//! process start; re-running against a populated store changes nothing.

use shared::error::AppResult;
use shared::models::{Role, User};
use uuid::Uuid;

use crate::db::repository::UserRepository;

/// Default accounts, one per role
const DEFAULT_ACCOUNTS: &[(&str, &str, Role)] = &[
    ("employee1", "김철수", Role::Employee),
    ("manager1", "박부장", Role::Manager),
    ("hr1", "이인사", Role::Hr),
    ("admin", "관리자", Role::Admin),
];

/// Ensure the default accounts exist
///
/// Existing usernames are left untouched, including their credential
/// hashes, so a restart never resets a rotated password.
pub fn ensure_default_users(users: &UserRepository, seed_password: &str) -> AppResult<()> {
    for (username, display_name, role) in DEFAULT_ACCOUNTS {
        if users.find_by_username(username).is_some() {
            continue;
        }

        let credential_hash = User::hash_password(seed_password)
            .map_err(|e| shared::error::AppError::internal(format!("password hash failed: {e}")))?;
        users.create(User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            role: *role,
            credential_hash,
        })?;
        tracing::info!(username, role = %role, "seeded default account");
    }

    Ok(())
}
