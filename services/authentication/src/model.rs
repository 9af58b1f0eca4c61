//! User records as held by the store.

use rust_common::UserView;
use std::fmt;

/// A stored user, including the password hash.
///
/// Deliberately not `Serialize`: the only way out of the service is
/// through [`User::view`].
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Opaque id assigned by the store
    pub id: String,
    /// Display name
    pub name: String,
    /// Unique email
    pub email: String,
    /// bcrypt hash
    pub password_hash: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .finish()
    }
}

impl User {
    /// Sanitized projection.
    #[must_use]
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// A user about to be inserted; the store assigns the id.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Unique email
    pub email: String,
    /// bcrypt hash
    pub password_hash: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl NewUser {
    /// Attach an id, producing the stored record.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> User {
        User {
            id: id.into(),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}
