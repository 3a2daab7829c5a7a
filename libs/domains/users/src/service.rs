use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

/// Service layer for User business logic.
///
/// Sole holder of the upsert decision workflow: a candidate without an id is
/// a creation request; a candidate with an id must already exist. Uniqueness
/// itself is enforced by the store, and its duplication errors pass through
/// unchanged.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Every persisted user, in store-insertion order
    pub async fn list_all(&self) -> UserResult<Vec<User>> {
        debug!("Retrieving all users");
        self.repository.find_all().await
    }

    /// Get a user by id
    pub async fn get_by_id(&self, id: i64) -> UserResult<User> {
        debug!("Retrieving user with ID: {}", id);
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Get a user by login name
    pub async fn get_by_name(&self, name: &str) -> UserResult<User> {
        debug!("Retrieving user with name: {}", name);
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| UserError::NameNotFound(name.to_string()))
    }

    /// Create or update a user.
    ///
    /// The existence check before an update is a separate read on purpose:
    /// an update against an unknown id must fail with `NotFound` rather than
    /// silently create a record. A concurrent delete between the check and
    /// the save is resolved by the store, which reports not-found at save
    /// time.
    #[instrument(skip(self, user), fields(login_name = %user.name))]
    pub async fn upsert(&self, user: User) -> UserResult<User> {
        match user.id {
            None => info!("Creating new user: {}", user.name),
            Some(id) => {
                info!("Updating user with ID: {}", id);
                // The user must exist in the store before the update.
                self.get_by_id(id).await?;
            }
        }

        match self.repository.save(user).await {
            Ok(persisted) => {
                info!(user_id = ?persisted.id, "Successfully upserted user");
                Ok(persisted)
            }
            Err(err @ (UserError::DuplicateName(_) | UserError::DuplicateEmail(_))) => {
                tracing::error!("Error upserting user: {}", err);
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Delete a user by id.
    ///
    /// Not idempotent: a second delete of the same id fails with `NotFound`.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: i64) -> UserResult<()> {
        info!("Trying to delete user with ID: {}", id);

        if !self.repository.delete_by_id(id).await? {
            return Err(UserError::NotFound(id));
        }

        info!("Deleted user with ID: {}", id);
        Ok(())
    }

    /// Remove all users and restart id assignment at 1.
    ///
    /// Used by test/reset workflows and the dev fixture loader only.
    pub async fn clear(&self) -> UserResult<()> {
        warn!("Clearing all user data");
        self.repository.clear().await?;
        self.repository.reset_identity_sequence().await
    }
}
