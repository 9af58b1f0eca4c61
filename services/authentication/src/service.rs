//! Registration, cached user listing and login.

use crate::cache::{self, ALL_USERS_KEY, Cache};
use crate::error::AuthError;
use crate::model::{NewUser, User};
use crate::password::PasswordHasher;
use crate::store::UserStore;
use crate::token::TokenSigner;
use rust_common::{CreateUser, LoginCredentials, LoginResponse, UserView};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Core authentication logic over injected collaborators.
#[derive(Clone)]
pub struct AuthenticationService {
    users: Arc<dyn UserStore>,
    cache: Arc<dyn Cache>,
    hasher: Arc<dyn PasswordHasher>,
    signer: Arc<dyn TokenSigner>,
}

impl std::fmt::Debug for AuthenticationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationService").finish_non_exhaustive()
    }
}

impl AuthenticationService {
    /// Wire the service to its store, cache, hasher and token signer.
    pub fn new(
        users: Arc<dyn UserStore>,
        cache: Arc<dyn Cache>,
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn TokenSigner>,
    ) -> Self {
        Self {
            users,
            cache,
            hasher,
            signer,
        }
    }

    /// Register a new user and invalidate the cached listing.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Conflict`] if the email is taken, or an
    /// infrastructure error if the store, hasher or cache fails. A cache
    /// failure after the insert still leaves the user persisted.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: CreateUser) -> Result<UserView, AuthError> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            warn!("Registration rejected: user already exists");
            return Err(AuthError::user_exists());
        }

        let password_hash = self.hasher.hash(&input.password).await?;
        let user = self
            .users
            .insert(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
            })
            .await
            .inspect_err(|e| {
                if matches!(e, AuthError::Conflict(_)) {
                    warn!("Registration rejected: concurrent duplicate email");
                }
            })?;

        self.cache.delete(ALL_USERS_KEY).await?;
        info!(user_id = %user.id, "User registered, cached listing invalidated");

        Ok(user.view())
    }

    /// List every user, served from the cache when possible.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if the cache or store fails, or if the
    /// cached payload does not decode.
    #[instrument(skip(self))]
    pub async fn get_users(&self) -> Result<Vec<UserView>, AuthError> {
        if let Some(users) =
            cache::get_json::<Vec<UserView>>(self.cache.as_ref(), ALL_USERS_KEY).await?
        {
            info!(count = users.len(), source = "cache", "Listed users");
            return Ok(users);
        }

        let users: Vec<UserView> = self
            .users
            .find_all()
            .await?
            .iter()
            .map(User::view)
            .collect();

        // Unsynchronized with register: a delete landing between the read
        // above and this write leaves a stale listing until the next
        // registration.
        cache::set_json(self.cache.as_ref(), ALL_USERS_KEY, &users).await?;
        info!(count = users.len(), source = "store", "Listed users");

        Ok(users)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] for missing fields, unknown email
    /// or wrong password; the latter two share one message.
    #[instrument(skip(self, credentials), fields(email = credentials.email.as_deref().unwrap_or("")))]
    pub async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, AuthError> {
        let Some((email, password)) = credentials.complete() else {
            warn!("Login rejected: missing credentials");
            return Err(AuthError::missing_credentials());
        };

        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Login rejected: unknown email");
            return Err(AuthError::invalid_credentials());
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::invalid_credentials());
        }

        let access_token = self.signer.sign(&user.id, &user.email)?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            access_token,
            user: user.view(),
        })
    }
}
