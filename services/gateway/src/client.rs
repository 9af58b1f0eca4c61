//! Client for the authentication service.

use crate::proto::authentication_service_client::AuthenticationServiceClient;
use crate::proto::{GetUsersRequest, LoginRequest, RegisterRequest, UserReply};
use async_trait::async_trait;
use rust_common::{CreateUser, LoginCredentials, LoginResponse, PlatformError, UserView};
use tonic::Status;
use tonic::transport::{Channel, Endpoint};

/// The three commands the gateway forwards.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// `Register` command.
    async fn register(&self, input: CreateUser) -> Result<UserView, Status>;

    /// `Login` command.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, Status>;

    /// `GetUsers` command.
    async fn get_users(&self) -> Result<Vec<UserView>, Status>;
}

fn view(reply: UserReply) -> UserView {
    UserView {
        id: reply.id,
        name: reply.name,
        email: reply.email,
    }
}

/// gRPC implementation over a lazily connected channel.
#[derive(Debug, Clone)]
pub struct GrpcAuthClient {
    inner: AuthenticationServiceClient<Channel>,
}

impl GrpcAuthClient {
    /// Wrap an existing channel.
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: AuthenticationServiceClient::new(channel),
        }
    }

    /// Build a channel that connects on first use, so the gateway can start
    /// before the authentication service is up.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::InvalidConfig`] if `url` is not a valid URI.
    pub fn connect_lazy(url: &str) -> Result<Self, PlatformError> {
        let endpoint = Endpoint::from_shared(url.to_string())
            .map_err(|e| PlatformError::invalid_config("AUTH_SERVICE_URL", e.to_string()))?;
        Ok(Self::new(endpoint.connect_lazy()))
    }
}

#[async_trait]
impl AuthClient for GrpcAuthClient {
    async fn register(&self, input: CreateUser) -> Result<UserView, Status> {
        let request = RegisterRequest {
            name: input.name,
            email: input.email,
            password: input.password,
        };
        let reply = self.inner.clone().register(request).await?;
        Ok(view(reply.into_inner()))
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, Status> {
        let request = LoginRequest {
            email: credentials.email,
            password: credentials.password,
        };
        let reply = self.inner.clone().login(request).await?.into_inner();
        let user = reply
            .user
            .ok_or_else(|| Status::internal("login reply without user"))?;
        Ok(LoginResponse {
            access_token: reply.access_token,
            user: view(user),
        })
    }

    async fn get_users(&self) -> Result<Vec<UserView>, Status> {
        let reply = self.inner.clone().get_users(GetUsersRequest {}).await?;
        Ok(reply.into_inner().users.into_iter().map(view).collect())
    }
}
