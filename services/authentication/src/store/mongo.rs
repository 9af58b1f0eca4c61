//! MongoDB-backed user store.

use super::UserStore;
use crate::error::AuthError;
use crate::model::{NewUser, User};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Collection holding user documents.
pub const USERS_COLLECTION: &str = "users";

/// Database used when neither config nor URI names one.
pub const DEFAULT_DATABASE: &str = "auth";

const DUPLICATE_KEY: i32 = 11000;

/// On-disk document shape.
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    email: String,
    password: String,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            name: doc.name,
            email: doc.email,
            password_hash: doc.password,
        }
    }
}

/// User store over a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoUserStore {
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    /// Connect, pick the database and ensure the unique email index.
    ///
    /// `database` overrides the database named in the URI; with neither,
    /// [`DEFAULT_DATABASE`] is used.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] if the URI is invalid or index creation fails.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AuthError> {
        let client = Client::with_uri_str(uri).await?;
        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        let store = Self {
            collection: db.collection(USERS_COLLECTION),
        };
        store.ensure_indexes().await?;

        info!(database = %db.name(), collection = USERS_COLLECTION, "Connected to user store");
        Ok(store)
    }

    async fn ensure_indexes(&self) -> Result<(), AuthError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

/// A unique-index violation on insert is a lost registration race.
fn insert_error(err: mongodb::error::Error) -> AuthError {
    if is_duplicate_key(&err) {
        AuthError::user_exists()
    } else {
        err.into()
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let found = self.collection.find_one(doc! { "email": email }).await?;
        Ok(found.map(User::from))
    }

    async fn find_all(&self) -> Result<Vec<User>, AuthError> {
        let cursor = self.collection.find(doc! {}).await?;
        let docs: Vec<UserDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(User::from).collect())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AuthError> {
        let document = UserDocument {
            id: ObjectId::new(),
            name: user.name,
            email: user.email,
            password: user.password_hash,
        };

        self.collection
            .insert_one(&document)
            .await
            .map_err(insert_error)?;
        Ok(User::from(document))
    }
}
