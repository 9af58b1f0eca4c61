//! gRPC surface of the authentication service.
//!
//! The generated `AuthenticationServiceServer` routes
//! `/auth.v1.AuthenticationService/{Register,Login,GetUsers}` to the handlers
//! below; each one converts the message, calls the core service and maps
//! errors to a sanitized `Status`.

use crate::error::AuthError;
use crate::proto::authentication_service_server::{
    AuthenticationService as AuthenticationRpc, AuthenticationServiceServer,
};
use crate::proto::{
    GetUsersRequest, LoginReply, LoginRequest, RegisterRequest, UserList, UserReply,
};
use crate::service::AuthenticationService;
use rust_common::{CreateUser, LoginCredentials, LoginResponse, UserView};
use std::sync::Arc;
use tonic::{Request, Response, Status};
use tracing::error;

impl From<UserView> for UserReply {
    fn from(view: UserView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            email: view.email,
        }
    }
}

impl From<LoginResponse> for LoginReply {
    fn from(response: LoginResponse) -> Self {
        Self {
            access_token: response.access_token,
            user: Some(response.user.into()),
        }
    }
}

impl From<RegisterRequest> for CreateUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

impl From<LoginRequest> for LoginCredentials {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

/// Tonic handler delegating to [`AuthenticationService`].
#[derive(Debug, Clone)]
pub struct AuthenticationServiceImpl {
    service: Arc<AuthenticationService>,
}

impl AuthenticationServiceImpl {
    /// Wrap the core service.
    #[must_use]
    pub const fn new(service: Arc<AuthenticationService>) -> Self {
        Self { service }
    }

    /// Generated server ready to be added to a tonic router.
    #[must_use]
    pub fn into_server(self) -> AuthenticationServiceServer<Self> {
        AuthenticationServiceServer::new(self)
    }
}

fn to_status(command: &'static str, err: AuthError) -> Status {
    if !err.is_domain() {
        error!(command, error = %err, "Command failed");
    }
    err.to_status()
}

#[tonic::async_trait]
impl AuthenticationRpc for AuthenticationServiceImpl {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<UserReply>, Status> {
        let view = self
            .service
            .register(request.into_inner().into())
            .await
            .map_err(|e| to_status("register", e))?;
        Ok(Response::new(view.into()))
    }

    async fn login(&self, request: Request<LoginRequest>) -> Result<Response<LoginReply>, Status> {
        let response = self
            .service
            .login(request.into_inner().into())
            .await
            .map_err(|e| to_status("login", e))?;
        Ok(Response::new(response.into()))
    }

    async fn get_users(
        &self,
        _request: Request<GetUsersRequest>,
    ) -> Result<Response<UserList>, Status> {
        let users = self
            .service
            .get_users()
            .await
            .map_err(|e| to_status("get_users", e))?;
        Ok(Response::new(UserList {
            users: users.into_iter().map(UserReply::from).collect(),
        }))
    }
}
