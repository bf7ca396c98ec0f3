//! Authentication endpoints.
//!
//! `login` and `register` return a validated [`LoginGrant`]: the raw body is
//! checked here so callers never see a half-formed session.

use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, EmailCheck, LoginGrant, LoginRequest, RegisterRequest};

/// `POST /auth/login`.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<LoginGrant, ApiError> {
    let body = api
        .post_for_text(&["auth", "login"], &LoginRequest { email, password })
        .await?;
    let grant = AuthResponse::from_body(&body)?.into_grant()?;
    info!(user_in_body = grant.identity.is_some(), "Login accepted");
    Ok(grant)
}

/// `POST /auth/register`. The backend signs the new account in immediately,
/// so the response has the same shape as a login.
pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<LoginGrant, ApiError> {
    let body = api.post_for_text(&["auth", "register"], request).await?;
    AuthResponse::from_body(&body)?.into_grant()
}

/// `GET /auth/check-email?email=…`
pub async fn check_email(api: &ApiClient, email: &str) -> Result<bool, ApiError> {
    let check: EmailCheck = api
        .get_json_with_query(&["auth", "check-email"], &[("email", email)])
        .await?;
    Ok(check.exists)
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::Query,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    use super::*;
    use crate::models::Role;
    use crate::test_util::spawn_stub;
    use crate::ClientConfig;

    async fn client(router: Router) -> ApiClient {
        ApiClient::new(&ClientConfig::new(spawn_stub(router).await)).unwrap()
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({"email": "doc@example.com", "password": "secret"}));
                Json(json!({
                    "token": "t.k.n",
                    "user": {"id": "user-1", "role": "ROLE_DOCTOR", "name": "Dr. Who"}
                }))
            }),
        );
        let api = client(router).await;

        let grant = login(&api, "doc@example.com", "secret").await.unwrap();
        assert_eq!(grant.token, "t.k.n");
        let identity = grant.identity.unwrap();
        assert_eq!(identity.id, "user-1");
        assert_eq!(identity.role, Role::Doctor);
    }

    #[tokio::test]
    async fn test_login_without_token_is_invalid() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { Json(json!({"message": "ok"})) }),
        );
        let api = client(router).await;

        assert!(matches!(
            login(&api, "a@b.c", "x").await,
            Err(ApiError::InvalidAuthResponse)
        ));
    }

    #[tokio::test]
    async fn test_login_rejected_by_server() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad credentials") }),
        );
        let api = client(router).await;

        let err = login(&api, "a@b.c", "x").await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_register_returns_grant() {
        let router = Router::new().route(
            "/api/auth/register",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["role"], "ROLE_PATIENT");
                assert_eq!(body["phone"], "(11) 98765-4321");
                Json(json!({"token": "new.token.here", "name": body["name"]}))
            }),
        );
        let api = client(router).await;

        let request = RegisterRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
            role: Role::Patient,
            specialty: None,
            phone: Some("(11) 98765-4321".to_string()),
        };
        let grant = register(&api, &request).await.unwrap();
        assert_eq!(grant.token, "new.token.here");
        assert!(grant.identity.is_none());
    }

    #[tokio::test]
    async fn test_check_email_sends_query() {
        let router = Router::new().route(
            "/api/auth/check-email",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let exists = params.get("email").map(String::as_str) == Some("taken@example.com");
                Json(json!({ "exists": exists }))
            }),
        );
        let api = client(router).await;

        assert!(check_email(&api, "taken@example.com").await.unwrap());
        assert!(!check_email(&api, "free@example.com").await.unwrap());
    }
}
