//! # Shared HTTP client
//!
//! [`ApiClient`] is the single configured transport used by every remote call.
//! It is a cheap `Clone` handle around one `reqwest::Client` and the base
//! address from [`ClientConfig`].
//!
//! ## Auth handlers
//!
//! The client knows nothing about sessions. Whoever owns the session registers
//! two callbacks once, through [`ApiClient::register_auth_handlers`]:
//!
//! - a **token supplier**, asked before every request. A non-empty token is
//!   sent as `Authorization: Bearer <token>`. If the supplier fails the
//!   request still goes out, only without the header.
//! - an **unauthorized hook**, run whenever a response has status `401`. Its
//!   failure or panic is logged and dropped; the caller always receives the
//!   original [`ApiError::Status`].
//!
//! A second registration is rejected so the 401 chain can never run twice.
//! Nothing here retries.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;

/// The error type returned by auth callbacks.
pub type AuthHookError = Box<dyn std::error::Error + Send + Sync>;

type TokenSupplier = Box<dyn Fn() -> Result<String, AuthHookError> + Send + Sync>;
type UnauthorizedHook = Box<dyn Fn() -> Result<(), AuthHookError> + Send + Sync>;

struct AuthHandlers {
    token: TokenSupplier,
    on_unauthorized: UnauthorizedHook,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    auth: OnceLock<AuthHandlers>,
}

/// REST client for the appointments API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("auth_registered", &self.has_auth_handlers())
            .finish()
    }
}

impl ApiClient {
    /// Creates a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        #[allow(unused_mut)]
        let mut builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("error creating HTTP client: {e}")))?;

        Self::with_client(&config.api_base_url, http)
    }

    /// Creates a client for the given base address and explicit [`reqwest::Client`].
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                auth: OnceLock::new(),
            }),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn has_auth_handlers(&self) -> bool {
        self.inner.auth.get().is_some()
    }

    /// Registers the token supplier and the unauthorized hook. Callable once
    /// per client; later calls fail with [`ApiError::AuthAlreadyRegistered`].
    pub fn register_auth_handlers<T, U>(
        &self,
        token_supplier: T,
        on_unauthorized: U,
    ) -> Result<(), ApiError>
    where
        T: Fn() -> Result<String, AuthHookError> + Send + Sync + 'static,
        U: Fn() -> Result<(), AuthHookError> + Send + Sync + 'static,
    {
        self.inner
            .auth
            .set(AuthHandlers {
                token: Box::new(token_supplier),
                on_unauthorized: Box::new(on_unauthorized),
            })
            .map_err(|_| ApiError::AuthAlreadyRegistered)
    }

    /// Absolute URL for a path below the base address. Segments are
    /// percent-encoded individually, so ids can be passed as-is.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidEndpoint {
                path: segments.join("/"),
                reason: "base URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Starts a request against the API. Send it with [`ApiClient::send`] so
    /// that the auth handlers apply.
    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        Ok(self.inner.http.request(method, url))
    }

    /// Sends a request, attaching credentials and reporting `401`s.
    ///
    /// Any non-success status is returned as [`ApiError::Status`].
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = self.authorize(request).build()?;

        debug!(method = %request.method(), url = %request.url(), "Sending request");

        let response = self.inner.http.execute(request).await?;
        let status = response.status();

        debug!(%status, body_len = %response.content_length().unwrap_or(0), "Got response");

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.notify_unauthorized();
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());

        Err(ApiError::Status { status, body })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let Some(handlers) = self.inner.auth.get() else {
            return request;
        };

        match (handlers.token)() {
            Ok(token) if !token.is_empty() => request.bearer_auth(token),
            Ok(_) => request,
            Err(e) => {
                warn!(error = %e, "Token supplier failed, sending request without credentials");
                request
            }
        }
    }

    fn notify_unauthorized(&self) {
        let Some(handlers) = self.inner.auth.get() else {
            return;
        };

        match catch_unwind(AssertUnwindSafe(|| (handlers.on_unauthorized)())) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Unauthorized hook failed"),
            Err(_) => warn!("Unauthorized hook panicked"),
        }
    }

    /// `GET` and decode a JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let request = self.request(Method::GET, segments)?;
        decode_json(self.send(request).await?).await
    }

    /// `GET` with query parameters and decode a JSON body.
    pub async fn get_json_with_query<T, Q>(
        &self,
        segments: &[&str],
        query: &Q,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, segments)?.query(query);
        decode_json(self.send(request).await?).await
    }

    /// `POST` a JSON body and decode a JSON response.
    pub async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, segments)?.json(body);
        decode_json(self.send(request).await?).await
    }

    /// `POST` a JSON body and return the raw response text.
    pub async fn post_for_text<B>(&self, segments: &[&str], body: &B) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, segments)?.json(body);
        Ok(self.send(request).await?.text().await?)
    }

    /// `PUT` a JSON body and decode a JSON response.
    pub async fn put_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, segments)?.json(body);
        decode_json(self.send(request).await?).await
    }

    /// `DELETE`; `true` when the server answered `204 No Content`.
    pub async fn delete(&self, segments: &[&str]) -> Result<bool, ApiError> {
        let request = self.request(Method::DELETE, segments)?;
        let response = self.send(request).await?;
        Ok(response.status() == StatusCode::NO_CONTENT)
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| ApiError::Decode { source, body })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{delete, get},
        Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;
    use crate::test_util::spawn_stub;

    fn echo_auth_router() -> Router {
        Router::new()
            .route(
                "/api/echo",
                get(|headers: HeaderMap| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    Json(json!({ "authorization": auth }))
                }),
            )
            .route(
                "/api/private",
                get(|| async { (AxumStatus::UNAUTHORIZED, "token expired") }),
            )
            .route(
                "/api/items/{id}",
                delete(|| async { AxumStatus::NO_CONTENT }),
            )
    }

    async fn client() -> ApiClient {
        let base = spawn_stub(echo_auth_router()).await;
        ApiClient::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = ApiClient::with_client("http://localhost:8080/api", reqwest::Client::new())
            .unwrap();
        assert_eq!(
            api.endpoint(&["doctors", "d-1", "slots"]).unwrap().as_str(),
            "http://localhost:8080/api/doctors/d-1/slots"
        );

        let api = ApiClient::with_client("http://localhost:8080/api/", reqwest::Client::new())
            .unwrap();
        assert_eq!(
            api.endpoint(&["appointments", "my"]).unwrap().as_str(),
            "http://localhost:8080/api/appointments/my"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let api = ApiClient::with_client("http://localhost:8080/api", reqwest::Client::new())
            .unwrap();
        assert_eq!(
            api.endpoint(&["doctors", "a/b"]).unwrap().as_str(),
            "http://localhost:8080/api/doctors/a%2Fb"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::with_client("not a url", reqwest::Client::new()),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            ApiClient::with_client("mailto:someone@example.com", reqwest::Client::new()),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn test_second_registration_is_rejected() {
        let api = ApiClient::with_client("http://localhost:8080/api", reqwest::Client::new())
            .unwrap();
        assert!(!api.has_auth_handlers());
        api.register_auth_handlers(|| Ok(String::new()), || Ok(()))
            .unwrap();
        assert!(api.has_auth_handlers());
        assert!(matches!(
            api.register_auth_handlers(|| Ok(String::new()), || Ok(())),
            Err(ApiError::AuthAlreadyRegistered)
        ));
    }

    #[tokio::test]
    async fn test_no_header_without_handlers() {
        let api = client().await;
        let body: Value = api.get_json(&["echo"]).await.unwrap();
        assert_eq!(body["authorization"], Value::Null);
    }

    #[tokio::test]
    async fn test_bearer_header_attached() {
        let api = client().await;
        api.register_auth_handlers(|| Ok("abc.def.ghi".to_string()), || Ok(()))
            .unwrap();
        let body: Value = api.get_json(&["echo"]).await.unwrap();
        assert_eq!(body["authorization"], "Bearer abc.def.ghi");
    }

    #[tokio::test]
    async fn test_empty_token_sends_no_header() {
        let api = client().await;
        api.register_auth_handlers(|| Ok(String::new()), || Ok(()))
            .unwrap();
        let body: Value = api.get_json(&["echo"]).await.unwrap();
        assert_eq!(body["authorization"], Value::Null);
    }

    #[tokio::test]
    async fn test_failing_supplier_does_not_block_request() {
        let api = client().await;
        api.register_auth_handlers(|| Err("store unavailable".into()), || Ok(()))
            .unwrap();
        let body: Value = api.get_json(&["echo"]).await.unwrap();
        assert_eq!(body["authorization"], Value::Null);
    }

    #[tokio::test]
    async fn test_unauthorized_hook_runs_and_error_propagates() {
        let api = client().await;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        api.register_auth_handlers(
            || Ok("stale".to_string()),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .unwrap();

        let err = api.get_json::<Value>(&["private"]).await.unwrap_err();
        assert!(err.is_unauthorized());
        match err {
            ApiError::Status { body, .. } => assert_eq!(body, "token expired"),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Successful responses do not trigger the hook
        let _: Value = api.get_json(&["echo"]).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failing_hook_does_not_mask_original_error() {
        let api = client().await;
        api.register_auth_handlers(|| Ok(String::new()), || Err("redirect failed".into()))
            .unwrap();
        let err = api.get_json::<Value>(&["private"]).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_panicking_hook_does_not_mask_original_error() {
        let api = client().await;
        api.register_auth_handlers(
            || Ok(String::new()),
            || -> Result<(), AuthHookError> { panic!("navigator gone") },
        )
        .unwrap();

        let err = api.get_json::<Value>(&["private"]).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(matches!(err, ApiError::Status { ref body, .. } if body == "token expired"));

        // the client stays usable afterwards
        let err = api.get_json::<Value>(&["private"]).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_other_statuses_do_not_trigger_hook() {
        let api = client().await;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        api.register_auth_handlers(
            || Ok(String::new()),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .unwrap();

        let err = api.get_json::<Value>(&["missing"]).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_reports_no_content() {
        let api = client().await;
        assert!(api.delete(&["items", "42"]).await.unwrap());
    }

    #[tokio::test]
    async fn test_decode_error_keeps_body() {
        let api = client().await;
        let err = api.get_json::<Vec<String>>(&["echo"]).await.unwrap_err();
        match err {
            ApiError::Decode { body, .. } => assert!(body.contains("authorization")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        // Nothing listens on port 9 (discard) on the loopback interface.
        let api = ApiClient::new(&ClientConfig::new("http://127.0.0.1:9/api")).unwrap();
        let err = api.get_json::<Value>(&["echo"]).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.status(), None);
    }
}
