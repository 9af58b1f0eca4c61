//! In-memory user store for tests and local runs.

use super::UserStore;
use crate::error::AuthError;
use crate::model::{NewUser, User};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Operation counters, read with [`InMemoryUserStore::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// `find_by_email` calls
    pub lookups: usize,
    /// `find_all` calls
    pub scans: usize,
    /// Successful inserts
    pub inserts: usize,
}

/// Vector-backed store enforcing the unique email index.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
    lookups: AtomicUsize,
    scans: AtomicUsize,
    inserts: AtomicUsize,
    fail_inserts: AtomicBool,
}

impl InMemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of operation counters.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            lookups: self.lookups.load(Ordering::SeqCst),
            scans: self.scans.load(Ordering::SeqCst),
            inserts: self.inserts.load(Ordering::SeqCst),
        }
    }

    /// Make every following insert fail with [`AuthError::Store`].
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, AuthError> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.read().await.clone())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AuthError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AuthError::store("insert rejected: primary unreachable"));
        }

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::user_exists());
        }

        let stored = user.with_id(Uuid::new_v4().to_string());
        users.push(stored.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "A".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryUserStore::new();
        let stored = store.insert(new_user("a@x.com")).await.unwrap();
        assert!(!stored.id.is_empty());

        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, stored.id);
        assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_email() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("a@x.com")).await.unwrap();

        let err = store.insert(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_failing_insert_stores_nothing() {
        let store = InMemoryUserStore::new();
        store.fail_inserts(true);

        let err = store.insert(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));
        assert!(store.is_empty().await);
        assert_eq!(store.stats().inserts, 0);

        store.fail_inserts(false);
        assert!(store.insert(new_user("a@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_all_preserves_order() {
        let store = InMemoryUserStore::new();
        for email in ["a@x.com", "b@x.com", "c@x.com"] {
            store.insert(new_user(email)).await.unwrap();
        }

        let emails: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.email)
            .collect();
        assert_eq!(emails, ["a@x.com", "b@x.com", "c@x.com"]);
    }

    #[tokio::test]
    async fn test_stats() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("a@x.com")).await.unwrap();
        let _ = store.insert(new_user("a@x.com")).await;
        store.find_by_email("a@x.com").await.unwrap();
        store.find_all().await.unwrap();
        store.find_all().await.unwrap();

        assert_eq!(
            store.stats(),
            StoreStats {
                lookups: 1,
                scans: 2,
                inserts: 1,
            }
        );
    }
}
