//! User service - the rules behind each user endpoint.
//!
//! Every operation is a short, strictly ordered sequence: compare request
//! fields, ask the store, mutate, respond. A failed check returns before
//! any later store call is made.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{
    MSG_EMAIL_ALREADY_TAKEN, MSG_FAILED_TO_CHANGE_PASSWORD, MSG_FAILED_TO_CREATE,
    MSG_FAILED_TO_DELETE, MSG_INVALID_PASSWORD, MSG_PASSWORD_CONFIRM_MISMATCH,
    MSG_PASSWORD_UNCHANGED, MSG_UNKNOWN_USER,
};
use crate::domain::{CreatedUser, PasswordChanged, User, UserId};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users exactly as the store returns them
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Create a user after checking the password confirmation and email
    async fn create_user(
        &self,
        name: String,
        email: String,
        password: &str,
        password_confirm: &str,
    ) -> AppResult<CreatedUser>;

    /// Update name and email
    async fn update_user(&self, id: Uuid, name: &str, email: &str) -> AppResult<UserId>;

    /// Delete user
    async fn delete_user(&self, id: Uuid) -> AppResult<UserId>;

    /// Change password after checking the confirmation
    async fn change_password(
        &self,
        id: Uuid,
        old_password: String,
        new_password: String,
        confirm_password: &str,
    ) -> AppResult<PasswordChanged>;
}

/// Concrete implementation of UserService over a user repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn ensure_email_free(&self, email: &str) -> AppResult<()> {
        if self.repo.is_email_taken(email).await? {
            tracing::debug!(email, "email already taken");
            return Err(AppError::email_already_taken(MSG_EMAIL_ALREADY_TAKEN));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::unprocessable(MSG_UNKNOWN_USER))
    }

    async fn create_user(
        &self,
        name: String,
        email: String,
        password: &str,
        password_confirm: &str,
    ) -> AppResult<CreatedUser> {
        if password != password_confirm {
            tracing::debug!("password confirmation mismatch on create");
            return Err(AppError::invalid_password(MSG_INVALID_PASSWORD));
        }

        self.ensure_email_free(&email).await?;

        if !self.repo.create(&name, &email, password).await? {
            return Err(AppError::unprocessable(MSG_FAILED_TO_CREATE));
        }

        tracing::info!(email = %email, "user created");
        Ok(CreatedUser { name, email })
    }

    // The user's own current email is not exempt from the uniqueness check,
    // so resubmitting an unchanged email is rejected.
    async fn update_user(&self, id: Uuid, name: &str, email: &str) -> AppResult<UserId> {
        self.ensure_email_free(email).await?;

        if !self.repo.update(id, name, email).await? {
            return Err(AppError::unprocessable(MSG_FAILED_TO_CREATE));
        }

        tracing::info!(%id, "user updated");
        Ok(UserId { id })
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<UserId> {
        if !self.repo.delete(id).await? {
            return Err(AppError::unprocessable(MSG_FAILED_TO_DELETE));
        }

        tracing::info!(%id, "user deleted");
        Ok(UserId { id })
    }

    async fn change_password(
        &self,
        id: Uuid,
        old_password: String,
        new_password: String,
        confirm_password: &str,
    ) -> AppResult<PasswordChanged> {
        if new_password != confirm_password {
            return Err(AppError::invalid_password(MSG_PASSWORD_CONFIRM_MISMATCH));
        }

        if old_password == new_password {
            return Err(AppError::invalid_password(MSG_PASSWORD_UNCHANGED));
        }

        let changed = self
            .repo
            .check_old_password_and_update(id, &old_password, &new_password)
            .await?;
        if !changed {
            return Err(AppError::unprocessable(MSG_FAILED_TO_CHANGE_PASSWORD));
        }

        tracing::info!(%id, "password changed");
        Ok(PasswordChanged {
            id,
            old_password,
            new_password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use mockall::predicate::eq;

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    fn user(id: Uuid) -> User {
        let mut user = User::new(
            "A".to_string(),
            "a@x.com".to_string(),
            "hashed".to_string(),
        );
        user.id = id;
        user
    }

    #[tokio::test]
    async fn test_list_users_passes_store_result_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .times(1)
            .returning(|| Ok(vec![user(Uuid::new_v4()), user(Uuid::new_v4())]));

        let users = service(repo).list_users().await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_list_users_propagates_store_fault() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Err(AppError::internal("store offline")));

        let result = service(repo).list_users().await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(user_id))
            .returning(|id| Ok(Some(user(id))));

        let found = service(repo).get_user(user_id).await.unwrap();
        assert_eq!(found.id, user_id);
    }

    #[tokio::test]
    async fn test_get_user_unknown_is_unprocessable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo).get_user(Uuid::new_v4()).await;
        match result {
            Err(AppError::UnprocessableEntity(msg)) => assert_eq!(msg, "Unknown user"),
            other => panic!("Expected UnprocessableEntity, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_is_email_taken()
            .withf(|email| email.to_string() == "a@x.com")
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_create()
            .withf(|name, email, password| {
                name.to_string() == "A"
                    && email.to_string() == "a@x.com"
                    && password.to_string() == "p1"
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let created = service(repo)
            .create_user("A".to_string(), "a@x.com".to_string(), "p1", "p1")
            .await
            .unwrap();

        assert_eq!(
            created,
            CreatedUser {
                name: "A".to_string(),
                email: "a@x.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_create_user_password_mismatch_touches_no_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_is_email_taken().never();
        repo.expect_create().never();

        let result = service(repo)
            .create_user("A".to_string(), "a@x.com".to_string(), "p1", "p2")
            .await;

        match result {
            Err(AppError::InvalidPassword(msg)) => assert_eq!(msg, "Invalid Password"),
            other => panic!("Expected InvalidPassword, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_user_email_taken_never_creates() {
        let mut repo = MockUserRepository::new();
        repo.expect_is_email_taken().returning(|_| Ok(true));
        repo.expect_create().never();

        let result = service(repo)
            .create_user("A".to_string(), "a@x.com".to_string(), "p1", "p1")
            .await;

        assert!(matches!(result, Err(AppError::EmailAlreadyTaken(_))));
    }

    #[tokio::test]
    async fn test_create_user_store_refusal_is_unprocessable() {
        let mut repo = MockUserRepository::new();
        repo.expect_is_email_taken().returning(|_| Ok(false));
        repo.expect_create().returning(|_, _, _| Ok(false));

        let result = service(repo)
            .create_user("A".to_string(), "a@x.com".to_string(), "p1", "p1")
            .await;

        match result {
            Err(AppError::UnprocessableEntity(msg)) => assert_eq!(msg, "Failed to create user"),
            other => panic!("Expected UnprocessableEntity, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_user_success() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_is_email_taken().returning(|_| Ok(false));
        repo.expect_update()
            .withf(move |id, name, email| {
                *id == user_id && name.to_string() == "B" && email.to_string() == "b@x.com"
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let result = service(repo)
            .update_user(user_id, "B", "b@x.com")
            .await
            .unwrap();

        assert_eq!(result, UserId { id: user_id });
    }

    #[tokio::test]
    async fn test_update_user_rejects_any_taken_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_is_email_taken().returning(|_| Ok(true));
        repo.expect_update().never();

        let result = service(repo)
            .update_user(Uuid::new_v4(), "A", "a@x.com")
            .await;

        assert!(matches!(result, Err(AppError::EmailAlreadyTaken(_))));
    }

    #[tokio::test]
    async fn test_update_user_store_refusal_reuses_create_message() {
        let mut repo = MockUserRepository::new();
        repo.expect_is_email_taken().returning(|_| Ok(false));
        repo.expect_update().returning(|_, _, _| Ok(false));

        let result = service(repo)
            .update_user(Uuid::new_v4(), "A", "new@x.com")
            .await;

        match result {
            Err(AppError::UnprocessableEntity(msg)) => assert_eq!(msg, "Failed to create user"),
            other => panic!("Expected UnprocessableEntity, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .with(eq(user_id))
            .returning(|_| Ok(true));

        let result = service(repo).delete_user(user_id).await.unwrap();
        assert_eq!(result.id, user_id);
    }

    #[tokio::test]
    async fn test_delete_user_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let result = service(repo).delete_user(Uuid::new_v4()).await;
        match result {
            Err(AppError::UnprocessableEntity(msg)) => assert_eq!(msg, "Failed to delete user"),
            other => panic!("Expected UnprocessableEntity, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_change_password_success_echoes_passwords() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_check_old_password_and_update()
            .withf(move |id, old, new| {
                *id == user_id && old.to_string() == "a" && new.to_string() == "b"
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let result = service(repo)
            .change_password(user_id, "a".to_string(), "b".to_string(), "b")
            .await
            .unwrap();

        assert_eq!(
            result,
            PasswordChanged {
                id: user_id,
                old_password: "a".to_string(),
                new_password: "b".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_change_password_confirm_mismatch_checked_first() {
        let mut repo = MockUserRepository::new();
        repo.expect_check_old_password_and_update().never();

        // old == new as well; the confirmation mismatch must win
        let result = service(repo)
            .change_password(Uuid::new_v4(), "a".to_string(), "a".to_string(), "c")
            .await;

        match result {
            Err(AppError::InvalidPassword(msg)) => {
                assert_eq!(msg, "New Password and Confirm Password do not match")
            }
            other => panic!("Expected InvalidPassword, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_change_password_same_as_old_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_check_old_password_and_update().never();

        let result = service(repo)
            .change_password(Uuid::new_v4(), "a".to_string(), "a".to_string(), "a")
            .await;

        match result {
            Err(AppError::InvalidPassword(msg)) => {
                assert_eq!(msg, "Old Password must be the same as the current password")
            }
            other => panic!("Expected InvalidPassword, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_change_password_wrong_old_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_check_old_password_and_update()
            .returning(|_, _, _| Ok(false));

        let result = service(repo)
            .change_password(Uuid::new_v4(), "wrong".to_string(), "b".to_string(), "b")
            .await;

        match result {
            Err(AppError::UnprocessableEntity(msg)) => assert_eq!(msg, "Failed to change Password"),
            other => panic!("Expected UnprocessableEntity, got {:?}", other),
        }
    }
}
