//! User repository: the store collaborator behind the user endpoints.
//!
//! Writes report success as a `bool`. A `false` means the store declined
//! the operation (missing row, failed write, wrong old password); an `Err`
//! is a fault the caller should not try to interpret.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every stored user
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Whether any user already holds this email
    async fn is_email_taken(&self, email: &str) -> AppResult<bool>;

    /// Create a user, hashing the plain text password
    async fn create(&self, name: &str, email: &str, password: &str) -> AppResult<bool>;

    /// Overwrite name and email
    async fn update(&self, id: Uuid, name: &str, email: &str) -> AppResult<bool>;

    /// Permanently delete user
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Verify `old_password` and, only if it matches, store `new_password`
    async fn check_old_password_and_update(
        &self,
        id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<bool>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<Option<user::Model>> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.find_model(id).await?.map(User::from))
    }

    async fn is_email_taken(&self, email: &str) -> AppResult<bool> {
        let existing = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(existing.is_some())
    }

    async fn create(&self, name: &str, email: &str, password: &str) -> AppResult<bool> {
        let password_hash = Password::new(password)?.into_string();
        let user = User::new(name.to_string(), email.to_string(), password_hash);

        let active_model = ActiveModel {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        };

        match active_model.insert(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!(error = %e, "user insert failed");
                Ok(false)
            }
        }
    }

    async fn update(&self, id: Uuid, name: &str, email: &str) -> AppResult<bool> {
        let Some(model) = self.find_model(id).await? else {
            return Ok(false);
        };

        let mut active: ActiveModel = model.into();
        active.name = Set(name.to_string());
        active.email = Set(email.to_string());
        active.updated_at = Set(chrono::Utc::now());

        match active.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!(%id, error = %e, "user update failed");
                Ok(false)
            }
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        match UserEntity::delete_by_id(id).exec(&self.db).await {
            Ok(result) => Ok(result.rows_affected > 0),
            Err(e) => {
                tracing::warn!(%id, error = %e, "user delete failed");
                Ok(false)
            }
        }
    }

    async fn check_old_password_and_update(
        &self,
        id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<bool> {
        let Some(model) = self.find_model(id).await? else {
            return Ok(false);
        };

        if !Password::from_hash(model.password_hash.clone()).verify(old_password) {
            return Ok(false);
        }

        let mut active: ActiveModel = model.into();
        active.password_hash = Set(Password::new(new_password)?.into_string());
        active.updated_at = Set(chrono::Utc::now());

        match active.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!(%id, error = %e, "password update failed");
                Ok(false)
            }
        }
    }
}
