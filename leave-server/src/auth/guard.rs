//! Access control guard
//!
//! Every lifecycle operation declares its allowed-role set next to its
//! handler and calls [`require`] before touching storage, so a failed check
//! can never leave partial side effects.

use shared::error::{AppError, ErrorCode};
use shared::models::Role;

use crate::auth::CurrentUser;

/// Check that the caller's role is in the allowed set
///
/// Returns 403 `PermissionDenied` otherwise. Missing or invalid identity is
/// rejected earlier (401) by the authentication middleware.
pub fn require(user: &CurrentUser, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&user.role) {
        return Ok(());
    }

    tracing::warn!(
        user_id = %user.id,
        username = %user.username,
        role = %user.role,
        required = ?allowed,
        "role check failed"
    );

    let required = allowed
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Err(
        AppError::with_message(ErrorCode::PermissionDenied, "Permission denied")
            .with_detail("requiredRoles", required),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn caller(role: Role) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            username: "test".to_string(),
            role,
        }
    }

    #[test]
    fn test_allowed_role_passes() {
        let user = caller(Role::Manager);
        assert!(require(&user, &[Role::Manager, Role::Admin]).is_ok());
    }

    #[test]
    fn test_disallowed_role_fails() {
        let user = caller(Role::Employee);
        let err = require(&user, &[Role::Manager, Role::Admin]).unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }

    #[test]
    fn test_no_implicit_hierarchy() {
        // admin passes only where it is explicitly listed
        let user = caller(Role::Admin);
        assert!(require(&user, &[Role::Employee]).is_err());
        assert!(require(&user, &[Role::Employee, Role::Admin]).is_ok());
    }
}
