//! User repository

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::User;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::store::RecordStore;

/// Repository for user accounts
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<RecordStore>,
}

impl UserRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Fetch a user by id
    pub fn get(&self, id: &Uuid) -> AppResult<User> {
        self.store
            .users
            .get(id)
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))
    }

    /// Fetch a user by username
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.store.users.find(|u| u.username == username)
    }

    /// Insert a new user; usernames are unique
    pub fn create(&self, user: User) -> AppResult<User> {
        if self.find_by_username(&user.username).is_some() {
            return Err(AppError::new(ErrorCode::UsernameExists)
                .with_detail("username", user.username.clone()));
        }
        self.store.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Replace a user's credential hash, keeping identity stable
    pub fn rotate_credential(&self, id: &Uuid, credential_hash: String) -> AppResult<User> {
        self.store
            .users
            .update_with::<AppError>(id, |user| {
                user.credential_hash = credential_hash;
                Ok(())
            })?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))
    }
}
