use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthenticatedUser, NewUser, User, UserUpdate};
use super::errors::AuthError;
use super::hasher::CredentialHasher;
use super::repository::UserRepository;

pub const MIN_PASSWORD_LEN: usize = 8;

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
    }
    Ok(())
}

/// User management and authentication, independent of web framework
pub struct UserService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
    hasher: Arc<dyn CredentialHasher>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(repo: Arc<R>, hasher: Arc<dyn CredentialHasher>) -> Self { Self { repo, hasher } }

    pub async fn list(&self) -> Result<Vec<User>, AuthError> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: i64) -> Result<User, AuthError> {
        self.repo.find_by_id(id).await
    }

    /// Add a user; only the hash of the password is stored.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::user::{UserService, domain::NewUser, hasher::Argon2Hasher, repository::mock::InMemoryUserRepository};
    /// let svc = UserService::new(Arc::new(InMemoryUserRepository::default()), Arc::new(Argon2Hasher::default()));
    /// let user = tokio_test::block_on(svc.add(NewUser { username: "alice".into(), password: "secret123".into() })).unwrap();
    /// assert_eq!(user.username, "alice");
    /// assert_ne!(user.password_hash, "secret123");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn add(&self, input: NewUser) -> Result<User, AuthError> {
        let NewUser { username, password } = input;
        models::user::validate_username(&username)?;
        validate_password(&password)?;
        if self.repo.find_by_username(&username).await?.is_some() {
            debug!("username taken");
            return Err(AuthError::Conflict);
        }

        let password_hash = self.hasher.hash(&password)?;
        drop(password);

        let now = Utc::now();
        let user = User { id: None, username, password_hash, created_at: now, updated_at: now };
        let saved = self.repo.save(user).await?;
        info!(user_id = ?saved.id, username = %saved.username, "user_added");
        Ok(saved)
    }

    /// Replace username and, when supplied, the password (re-hashed like `add`).
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn update(&self, id: i64, input: UserUpdate) -> Result<User, AuthError> {
        let UserUpdate { username, password } = input;
        models::user::validate_username(&username)?;
        if let Some(p) = &password {
            validate_password(p)?;
        }

        let mut existing = self.repo.find_by_id(id).await?;
        if existing.username != username {
            if let Some(other) = self.repo.find_by_username(&username).await? {
                if other.id != existing.id {
                    return Err(AuthError::Conflict);
                }
            }
        }

        existing.username = username;
        if let Some(p) = password {
            existing.password_hash = self.hasher.hash(&p)?;
        }
        existing.updated_at = Utc::now();
        let saved = self.repo.save(existing).await?;
        info!(user_id = id, "user_updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AuthError> {
        self.repo.delete_by_id(id).await?;
        info!(user_id = id, "user_deleted");
        Ok(())
    }

    /// Check a username/password pair.
    ///
    /// Fails with `UserNotFound` for unknown users and `InvalidCredentials` on a wrong password.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        let user = self.repo.find_by_username(username).await?.ok_or(AuthError::UserNotFound)?;
        if user.username != username {
            warn!(returned = %user.username, "gateway returned mismatched user");
            return Err(AuthError::UserNotFound);
        }
        if !self.hasher.verify(password, &user.password_hash)? {
            info!(user_id = ?user.id, "authentication_failed");
            return Err(AuthError::InvalidCredentials);
        }
        info!(user_id = ?user.id, "authenticated");
        Ok(AuthenticatedUser { user_id: user.id.unwrap_or_default(), username: user.username })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::hasher::Argon2Hasher;
    use crate::user::repository::mock::InMemoryUserRepository;
    use async_trait::async_trait;
    use configs::PasswordConfig;

    fn hasher() -> Arc<dyn CredentialHasher> {
        Arc::new(Argon2Hasher::new(&PasswordConfig { memory_kib: 64, iterations: 1, parallelism: 1 }).unwrap())
    }

    fn setup() -> (Arc<InMemoryUserRepository>, UserService<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::default());
        (repo.clone(), UserService::new(repo, hasher()))
    }

    fn new_user(username: &str, password: &str) -> NewUser {
        NewUser { username: username.into(), password: password.into() }
    }

    #[tokio::test]
    async fn add_never_stores_raw_password() {
        let (repo, svc) = setup();
        let user = svc.add(new_user("alice", "secret123")).await.unwrap();
        assert!(user.id.is_some());
        for stored in repo.stored() {
            assert_ne!(stored.password_hash, "secret123");
            assert!(!stored.password_hash.contains("secret123"));
            assert!(stored.password_hash.starts_with("$argon2id$"));
        }
    }

    #[tokio::test]
    async fn authenticate_outcomes() {
        let (_repo, svc) = setup();
        let user = svc.add(new_user("alice", "secret123")).await.unwrap();

        let ok = svc.authenticate("alice", "secret123").await.unwrap();
        assert_eq!(ok.user_id, user.id.unwrap());
        assert_eq!(ok.username, "alice");

        assert!(matches!(svc.authenticate("alice", "wrong").await, Err(AuthError::InvalidCredentials)));
        assert!(matches!(svc.authenticate("ghost", "secret123").await, Err(AuthError::UserNotFound)));
        assert!(matches!(svc.authenticate("ALICE", "secret123").await, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn add_rejects_duplicates_and_bad_input() {
        let (_repo, svc) = setup();
        svc.add(new_user("bob", "password1")).await.unwrap();
        assert!(matches!(svc.add(new_user("bob", "password2")).await, Err(AuthError::Conflict)));
        assert!(matches!(svc.add(new_user("carol", "short")).await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.add(new_user("  ", "password1")).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn get_unknown_is_explicit_not_found() {
        let (_repo, svc) = setup();
        assert!(matches!(svc.get(99).await, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn update_rehashes_supplied_password() {
        let (repo, svc) = setup();
        let user = svc.add(new_user("dave", "firstpass")).await.unwrap();
        let id = user.id.unwrap();

        let updated = svc
            .update(id, UserUpdate { username: "dave".into(), password: Some("secondpass".into()) })
            .await
            .unwrap();
        assert_eq!(updated.id, Some(id));
        assert_ne!(updated.password_hash, user.password_hash);
        assert!(repo.stored().iter().all(|u| !u.password_hash.contains("secondpass")));

        assert!(svc.authenticate("dave", "secondpass").await.is_ok());
        assert!(matches!(svc.authenticate("dave", "firstpass").await, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn update_without_password_keeps_hash() {
        let (_repo, svc) = setup();
        let user = svc.add(new_user("erin", "password1")).await.unwrap();
        let renamed = svc
            .update(user.id.unwrap(), UserUpdate { username: "erin2".into(), password: None })
            .await
            .unwrap();
        assert_eq!(renamed.username, "erin2");
        assert_eq!(renamed.password_hash, user.password_hash);
        assert!(svc.authenticate("erin2", "password1").await.is_ok());
        assert!(matches!(svc.authenticate("erin", "password1").await, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn update_conflicts_and_missing() {
        let (_repo, svc) = setup();
        svc.add(new_user("frank", "password1")).await.unwrap();
        let grace = svc.add(new_user("grace", "password1")).await.unwrap();
        let res = svc.update(grace.id.unwrap(), UserUpdate { username: "frank".into(), password: None }).await;
        assert!(matches!(res, Err(AuthError::Conflict)));
        let res = svc.update(1234, UserUpdate { username: "nobody".into(), password: None }).await;
        assert!(matches!(res, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn delete_then_get_not_found() {
        let (_repo, svc) = setup();
        let user = svc.add(new_user("heidi", "password1")).await.unwrap();
        let id = user.id.unwrap();
        svc.delete(id).await.unwrap();
        assert!(matches!(svc.get(id).await, Err(AuthError::NotFound)));
        assert!(matches!(svc.delete(id).await, Err(AuthError::NotFound)));
        assert!(svc.list().await.unwrap().is_empty());
    }

    /// Gateway that answers every username lookup with the same record.
    struct SloppyRepository(User);

    #[async_trait]
    impl UserRepository for SloppyRepository {
        async fn find_all(&self) -> Result<Vec<User>, AuthError> { Ok(vec![self.0.clone()]) }
        async fn find_by_id(&self, _id: i64) -> Result<User, AuthError> { Ok(self.0.clone()) }
        async fn find_by_username(&self, _username: &str) -> Result<Option<User>, AuthError> { Ok(Some(self.0.clone())) }
        async fn save(&self, user: User) -> Result<User, AuthError> { Ok(user) }
        async fn delete_by_id(&self, _id: i64) -> Result<(), AuthError> { Ok(()) }
    }

    #[tokio::test]
    async fn mismatched_gateway_record_is_user_not_found() {
        let h = hasher();
        let now = Utc::now();
        let stored = User { id: Some(1), username: "alice".into(), password_hash: h.hash("secret123").unwrap(), created_at: now, updated_at: now };
        let svc = UserService::new(Arc::new(SloppyRepository(stored)), h);
        assert!(svc.authenticate("alice", "secret123").await.is_ok());
        assert!(matches!(svc.authenticate("mallory", "secret123").await, Err(AuthError::UserNotFound)));
    }
}
