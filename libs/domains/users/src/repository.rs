use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Data access port for User persistence.
///
/// The store owns id assignment and timestamp stamping: `save` sets both
/// timestamps on insert and refreshes `updated_at` (preserving `created_at`)
/// on overwrite, immediately before the write executes. Both uniqueness
/// constraints (login name, email address) are enforced here and surface as
/// `DuplicateName` / `DuplicateEmail`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All persisted users in insertion order
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Look up a user by id
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Look up a user by login name
    async fn find_by_name(&self, name: &str) -> UserResult<Option<User>>;

    /// Insert when `user.id` is absent, overwrite by id when present.
    /// Overwriting a missing id fails with `NotFound`.
    async fn save(&self, user: User) -> UserResult<User>;

    /// Delete by id; returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> UserResult<bool>;

    /// Remove all users unconditionally
    async fn clear(&self) -> UserResult<()>;

    /// Restart id assignment at 1 (test/reset workflows)
    async fn reset_identity_sequence(&self) -> UserResult<()>;
}

#[derive(Debug)]
struct InMemoryStore {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

/// In-memory implementation of UserRepository (for development/testing).
///
/// Mirrors the Postgres store's semantics: sequential ids from 1, explicit
/// timestamp stamping in `save`, and the same duplication error taxonomy.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<InMemoryStore>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(InMemoryStore {
                users: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.name == name).cloned())
    }

    async fn save(&self, user: User) -> UserResult<User> {
        let mut store = self.store.write().await;

        // Uniqueness against every other user; the colliding field decides
        // the error variant, login name checked first like the database
        // would report it.
        if store
            .users
            .values()
            .any(|u| u.id != user.id && u.name == user.name)
        {
            return Err(UserError::DuplicateName(user.name));
        }
        if store
            .users
            .values()
            .any(|u| u.id != user.id && u.email_address == user.email_address)
        {
            return Err(UserError::DuplicateEmail(user.email_address));
        }

        let now = Utc::now();
        match user.id {
            None => {
                let id = store.next_id;
                store.next_id += 1;

                let persisted = User {
                    id: Some(id),
                    created_at: Some(now),
                    updated_at: Some(now),
                    ..user
                };
                store.users.insert(id, persisted.clone());

                tracing::info!(user_id = id, login_name = %persisted.name, "Created user");
                Ok(persisted)
            }
            Some(id) => {
                let created_at = match store.users.get(&id) {
                    Some(existing) => existing.created_at,
                    None => return Err(UserError::NotFound(id)),
                };

                let persisted = User {
                    created_at,
                    updated_at: Some(now),
                    ..user
                };
                store.users.insert(id, persisted.clone());

                tracing::info!(user_id = id, "Updated user");
                Ok(persisted)
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> UserResult<bool> {
        let mut store = self.store.write().await;

        if store.users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn clear(&self) -> UserResult<()> {
        let mut store = self.store.write().await;
        store.users.clear();
        Ok(())
    }

    async fn reset_identity_sequence(&self) -> UserResult<()> {
        let mut store = self.store.write().await;
        store.next_id = 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::TestDataBuilder;

    fn user(name: &str, email: &str) -> User {
        User {
            id: None,
            created_at: None,
            updated_at: None,
            name: name.to_string(),
            email_address: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids_and_timestamps() {
        let repo = InMemoryUserRepository::new();

        let first = repo.save(user("jdoe", "j@x.com")).await.unwrap();
        let second = repo.save(user("asmith", "a@x.com")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert!(first.created_at.is_some());
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_find_by_id_and_name() {
        let repo = InMemoryUserRepository::new();
        let created = repo.save(user("jdoe", "j@x.com")).await.unwrap();

        let by_id = repo.find_by_id(1).await.unwrap();
        assert_eq!(by_id, Some(created.clone()));

        let by_name = repo.find_by_name("jdoe").await.unwrap();
        assert_eq!(by_name, Some(created));

        assert_eq!(repo.find_by_id(42).await.unwrap(), None);
        assert_eq!(repo.find_by_name("ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_login_name_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.save(user("jdoe", "j@x.com")).await.unwrap();

        let result = repo.save(user("jdoe", "other@x.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateName(name)) if name == "jdoe"));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.save(user("jdoe", "j@x.com")).await.unwrap();

        let result = repo.save(user("asmith", "j@x.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(email)) if email == "j@x.com"));
    }

    #[tokio::test]
    async fn test_update_preserves_created_at_and_refreshes_updated_at() {
        let repo = InMemoryUserRepository::new();
        let created = repo.save(user("jdoe", "j@x.com")).await.unwrap();

        let updated = repo
            .save(User {
                first_name: "Janet".to_string(),
                ..created.clone()
            })
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.first_name, "Janet");
    }

    #[tokio::test]
    async fn test_update_may_keep_own_unique_fields() {
        let repo = InMemoryUserRepository::new();
        let created = repo.save(user("jdoe", "j@x.com")).await.unwrap();

        // Saving the same user again must not collide with itself.
        let resaved = repo.save(created.clone()).await.unwrap();
        assert_eq!(resaved.name, "jdoe");
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_is_not_found() {
        let repo = InMemoryUserRepository::new();

        let result = repo
            .save(User {
                id: Some(999),
                ..user("jdoe", "j@x.com")
            })
            .await;

        assert!(matches!(result, Err(UserError::NotFound(999))));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_and_sequence_reset() {
        let repo = InMemoryUserRepository::new();
        let builder = TestDataBuilder::from_test_name("test_clear_and_sequence_reset");

        for i in 0..3 {
            repo.save(user(
                &builder.login_name(&i.to_string()),
                &builder.email_address(&i.to_string()),
            ))
            .await
            .unwrap();
        }
        assert_eq!(repo.find_all().await.unwrap().len(), 3);

        repo.clear().await.unwrap();
        repo.reset_identity_sequence().await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());

        let recreated = repo.save(user("jdoe", "j@x.com")).await.unwrap();
        assert_eq!(recreated.id, Some(1));
    }

    #[tokio::test]
    async fn test_find_all_returns_insertion_order() {
        let repo = InMemoryUserRepository::new();
        repo.save(user("charlie", "c@x.com")).await.unwrap();
        repo.save(user("alice", "a@x.com")).await.unwrap();
        repo.save(user("bob", "b@x.com")).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["charlie", "alice", "bob"]);
    }
}
