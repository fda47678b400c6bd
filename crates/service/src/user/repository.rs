use async_trait::async_trait;

use super::domain::User;
use super::errors::AuthError;

/// Persistence gateway for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, AuthError>;
    /// Fails with `NotFound` when absent.
    async fn find_by_id(&self, id: i64) -> Result<User, AuthError>;
    /// Exact match on username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;
    /// Insert when `user.id` is `None`, otherwise overwrite. Duplicate usernames fail with `Conflict`.
    async fn save(&self, user: User) -> Result<User, AuthError>;
    /// Fails with `NotFound` when absent.
    async fn delete_by_id(&self, id: i64) -> Result<(), AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i64, User>,
        last_id: i64,
    }

    #[derive(Default)]
    pub struct InMemoryUserRepository {
        state: Mutex<State>,
    }

    impl InMemoryUserRepository {
        fn lock(&self) -> Result<MutexGuard<'_, State>, AuthError> {
            self.state.lock().map_err(|_| AuthError::Repository("user store lock poisoned".into()))
        }

        /// Raw stored rows, for asserting on what was persisted.
        pub fn stored(&self) -> Vec<User> {
            self.state.lock().map(|s| s.rows.values().cloned().collect()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find_all(&self) -> Result<Vec<User>, AuthError> {
            Ok(self.lock()?.rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<User, AuthError> {
            self.lock()?.rows.get(&id).cloned().ok_or(AuthError::NotFound)
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
            Ok(self.lock()?.rows.values().find(|u| u.username == username).cloned())
        }

        async fn save(&self, mut user: User) -> Result<User, AuthError> {
            let mut state = self.lock()?;
            if state.rows.values().any(|u| u.username == user.username && u.id != user.id) {
                return Err(AuthError::Conflict);
            }
            let id = match user.id {
                Some(id) if state.rows.contains_key(&id) => id,
                Some(_) => return Err(AuthError::NotFound),
                None => {
                    state.last_id += 1;
                    user.id = Some(state.last_id);
                    state.last_id
                }
            };
            state.rows.insert(id, user.clone());
            Ok(user)
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), AuthError> {
            self.lock()?.rows.remove(&id).map(|_| ()).ok_or(AuthError::NotFound)
        }
    }
}
