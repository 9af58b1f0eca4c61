//! User store.
//!
//! The collection is the single source of truth for users. Email is the
//! unique key; inserting a duplicate fails with [`AuthError::Conflict`].

pub mod memory;
pub mod mongo;

pub use memory::{InMemoryUserStore, StoreStats};
pub use mongo::MongoUserStore;

use crate::error::AuthError;
use crate::model::{NewUser, User};
use async_trait::async_trait;

/// Document collection of users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the user registered under `email`.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Read every user, in store order.
    async fn find_all(&self) -> Result<Vec<User>, AuthError>;

    /// Persist a new user and return it with its assigned id.
    async fn insert(&self, user: NewUser) -> Result<User, AuthError>;
}
