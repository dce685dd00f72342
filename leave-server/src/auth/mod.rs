//! Authentication and authorization
//!
//! - [`JwtService`]: token issue/verify
//! - [`middleware::require_auth`]: bearer-token middleware injecting
//!   [`CurrentUser`] into request extensions
//! - [`guard`]: the access-control guard checked before every lifecycle
//!   operation

pub mod extractor;
pub mod guard;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

use shared::models::Role;
use uuid::Uuid;

/// Authenticated caller identity, extracted from a validated token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| JwtError::InvalidToken("subject is not a valid id".to_string()))?;
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| JwtError::InvalidToken("unknown role claim".to_string()))?;

        Ok(Self {
            id,
            username: claims.username,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_from_claims() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            username: "park".to_string(),
            role: "hr".to_string(),
            token_type: "access".to_string(),
            exp: 0,
            iat: 0,
            iss: "leave-server".to_string(),
            aud: "leave-clients".to_string(),
        };

        let user = CurrentUser::try_from(claims).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.role, Role::Hr);
    }

    #[test]
    fn test_unknown_role_claim_rejected() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "park".to_string(),
            role: "root".to_string(),
            token_type: "access".to_string(),
            exp: 0,
            iat: 0,
            iss: "leave-server".to_string(),
            aud: "leave-clients".to_string(),
        };
        assert!(CurrentUser::try_from(claims).is_err());
    }
}
