//! In-process repositories used by the handler tests.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::users::repo::UserRepository;
use crate::users::repo_types::{User, UserChanges};

/// Keeps records in insertion order, like a table without an index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.rows.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, name: &str, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.rows.write().await.push(user.clone());
        Ok(user)
    }

    async fn update_by_id(&self, id: Uuid, changes: UserChanges) -> anyhow::Result<Option<User>> {
        let mut rows = self.rows.write().await;
        let Some(user) = rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password = hash;
        }
        Ok(Some(user.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()> {
        self.rows.write().await.retain(|u| u.id != id);
        Ok(())
    }
}

/// Reads succeed against an inner store; every write fails.
pub struct FailingWritesRepository {
    pub inner: InMemoryUserRepository,
}

#[async_trait]
impl UserRepository for FailingWritesRepository {
    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        self.inner.list_all().await
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.inner.find_by_id(id).await
    }

    async fn create(&self, _name: &str, _email: &str, _hash: &str) -> anyhow::Result<User> {
        anyhow::bail!("connection refused")
    }

    async fn update_by_id(&self, _id: Uuid, _changes: UserChanges) -> anyhow::Result<Option<User>> {
        anyhow::bail!("connection refused")
    }

    async fn delete_by_id(&self, _id: Uuid) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_user_is_found_by_id() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create("Ana", "ana@example.com", "hash").await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().expect("user exists");
        assert_eq!(found.name, "Ana");
        assert_eq!(found.email, "ana@example.com");
    }

    #[tokio::test]
    async fn update_keeps_fields_not_supplied() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create("Ana", "ana@example.com", "hash").await.unwrap();

        let changes = UserChanges { name: Some("Ana María".into()), ..Default::default() };
        let updated = repo.update_by_id(created.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.name, "Ana María");
        assert_eq!(updated.email, "ana@example.com");
        assert_eq!(updated.password, "hash");
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_none() {
        let repo = InMemoryUserRepository::new();
        let res = repo.update_by_id(Uuid::new_v4(), UserChanges::default()).await.unwrap();
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn delete_twice_is_ok() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create("Ana", "ana@example.com", "hash").await.unwrap();

        repo.delete_by_id(created.id).await.unwrap();
        repo.delete_by_id(created.id).await.unwrap();
        assert_eq!(repo.len().await, 0);
    }
}
