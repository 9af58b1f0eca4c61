//! Route tests driving the router with a stubbed authentication client.

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::ConnectInfo;
use axum::http::{Method, Request, StatusCode, header};
use gateway_service::error::ErrorBody;
use gateway_service::rate_limiter::RateLimitConfig;
use gateway_service::{AppState, AuthClient, build_router};
use rust_common::{CreateUser, JwtConfig, JwtService, LoginCredentials, LoginResponse, UserView};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use test_utils::fixtures;
use tonic::{Code, Status};
use tower::ServiceExt;

#[derive(Default)]
struct StubAuth {
    calls: AtomicUsize,
    failure: Option<(Code, &'static str)>,
}

impl StubAuth {
    fn failing(code: Code, message: &'static str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some((code, message)),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some((code, message)) => Err(Status::new(code, message)),
            None => Ok(()),
        }
    }
}

fn alice() -> UserView {
    UserView {
        id: "656f2b0c9d1e8a0012345678".to_string(),
        name: "A".to_string(),
        email: "a@x.com".to_string(),
    }
}

#[async_trait]
impl AuthClient for StubAuth {
    async fn register(&self, input: CreateUser) -> Result<UserView, Status> {
        self.check()?;
        Ok(UserView {
            name: input.name,
            email: input.email,
            ..alice()
        })
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, Status> {
        self.check()?;
        match credentials.complete() {
            None => Err(Status::unauthenticated("Email and password are required")),
            Some(("a@x.com", "abcdef")) => Ok(LoginResponse {
                access_token: "signed.token.value".to_string(),
                user: alice(),
            }),
            Some(_) => Err(Status::unauthenticated("Invalid credentials")),
        }
    }

    async fn get_users(&self) -> Result<Vec<UserView>, Status> {
        self.check()?;
        Ok(vec![alice()])
    }
}

fn app_with(stub: Arc<StubAuth>, limit: u32) -> Router {
    let state = AppState::new(
        stub,
        JwtService::new(fixtures::jwt_config()),
        RateLimitConfig {
            limit,
            window: Duration::from_secs(60),
        },
    )
    .unwrap();
    build_router(state)
}

fn app(stub: Arc<StubAuth>) -> Router {
    app_with(stub, 1_000)
}

fn json_request(method: Method, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn users_request(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri("/auth/users");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn valid_token() -> String {
    JwtService::new(fixtures::jwt_config())
        .sign(&alice().id, &alice().email)
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn read_error(response: axum::response::Response) -> ErrorBody {
    serde_json::from_value(read_json(response).await).unwrap()
}

#[tokio::test]
async fn test_register_created() {
    let stub = Arc::new(StubAuth::default());
    let response = app(stub.clone())
        .oneshot(json_request(
            Method::POST,
            "/auth/register",
            fixtures::register_body(&fixtures::sample_user()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["name"], "A");
    assert_eq!(body["email"], "a@x.com");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(body.get("password").is_none());
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_register_validation_never_reaches_service() {
    let stub = Arc::new(StubAuth::default());
    let response = app(stub.clone())
        .oneshot(json_request(
            Method::POST,
            "/auth/register",
            fixtures::register_body(&fixtures::user("A", "not-an-email", "abc")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_error(response).await;
    assert_eq!(body.status_code, 400);
    assert!(body.message.contains("email must be an email"));
    assert!(body.message.contains("password must be longer than or equal to 6 characters"));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_register_conflict_is_bad_request() {
    let stub = Arc::new(StubAuth::failing(Code::AlreadyExists, "User already exists"));
    let response = app(stub)
        .oneshot(json_request(
            Method::POST,
            "/auth/register",
            fixtures::register_body(&fixtures::sample_user()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_error(response).await,
        ErrorBody {
            status_code: 400,
            message: "User already exists".to_string(),
        }
    );
}

#[tokio::test]
async fn test_register_malformed_json() {
    let response = app(Arc::new(StubAuth::default()))
        .oneshot(json_request(Method::POST, "/auth/register", "{".to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_error(response).await.status_code, 400);
}

#[tokio::test]
async fn test_login_created() {
    let response = app(Arc::new(StubAuth::default()))
        .oneshot(json_request(
            Method::POST,
            "/auth/login",
            fixtures::login_body("a@x.com", "abcdef"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["access_token"], "signed.token.value");
    assert_eq!(body["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_login_failures_are_unauthorized() {
    let router = app(Arc::new(StubAuth::default()));

    let response = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/auth/login",
            fixtures::login_body("a@x.com", "wrong"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        read_error(response).await,
        ErrorBody {
            status_code: 401,
            message: "Invalid credentials".to_string(),
        }
    );

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/auth/login",
            r#"{"email":"a@x.com"}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        read_error(response).await.message,
        "Email and password are required"
    );
}

#[tokio::test]
async fn test_users_requires_bearer() {
    let stub = Arc::new(StubAuth::default());
    let router = app(stub.clone());

    let response = router.clone().oneshot(users_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_error(response).await.message, "Unauthorized");

    let response = router
        .clone()
        .oneshot(users_request(Some("not.a.token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let foreign = JwtService::new(JwtConfig::new("other-secret", Duration::from_secs(60)))
        .sign("x", "x@x.com")
        .unwrap();
    let response = router.oneshot(users_request(Some(&foreign))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_users_with_token() {
    let response = app(Arc::new(StubAuth::default()))
        .oneshot(users_request(Some(&valid_token())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body, serde_json::json!([alice()]));
}

#[tokio::test]
async fn test_users_service_failure_is_bad_request() {
    let stub = Arc::new(StubAuth::failing(Code::Unavailable, "connection refused 10.0.0.7"));
    let response = app(stub)
        .oneshot(users_request(Some(&valid_token())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_error(response).await;
    assert!(!body.message.contains("10.0.0.7"));
}

#[tokio::test]
async fn test_eleventh_request_is_throttled() {
    let router = app_with(Arc::new(StubAuth::default()), 10);

    for _ in 0..10 {
        let response = router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/auth/login",
                fixtures::login_body("a@x.com", "abcdef"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()["x-ratelimit-limit"], "10");
    }

    let response = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/auth/login",
            fixtures::login_body("a@x.com", "abcdef"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));
    assert_eq!(read_error(response).await.status_code, 429);

    // Other routes share the client's window.
    let response = router.oneshot(users_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_throttle_is_per_client() {
    let router = app_with(Arc::new(StubAuth::default()), 1);

    let from = |ip: [u8; 4]| {
        let mut request = users_request(Some(&valid_token()));
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from((ip, 40_000))));
        request
    };

    assert_eq!(
        router.clone().oneshot(from([10, 0, 0, 1])).await.unwrap().status(),
        StatusCode::OK
    );
    assert_eq!(
        router.clone().oneshot(from([10, 0, 0, 1])).await.unwrap().status(),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        router.oneshot(from([10, 0, 0, 2])).await.unwrap().status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let router = app_with(Arc::new(StubAuth::default()), 1);

    for _ in 0..2 {
        router
            .clone()
            .oneshot(users_request(Some(&valid_token())))
            .await
            .unwrap();
    }

    let response = router
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains(r#"gateway_http_requests_total{route="/auth/users",status="200"} 1"#));
    assert!(text.contains(r#"gateway_http_requests_total{route="/auth/users",status="429"} 1"#));
    assert!(text.contains("gateway_rate_limited_total 1"));
}
