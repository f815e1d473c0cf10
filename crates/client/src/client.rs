//! The JobBOSS2 REST client.
//!
//! One `reqwest` client talks to the API origin, a second one to the OAuth2
//! token endpoint (which may live on another host). Token state sits behind a
//! `tokio` mutex: holding the lock across the fetch gives single-flight
//! refresh for concurrent callers.

use crate::config::ClientConfig;
use crate::endpoint::{self, encode_segment};
use crate::error::{ClientError, Result};
use crate::params::QueryParams;
use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

/// Cap on how early a token is considered expired (refresh buffer).
const MAX_TOKEN_BUFFER_SECS: u64 = 300;

/// Pause between background refresh attempts when no expiry is known yet or
/// the previous attempt failed.
const REFRESH_RETRY_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Default)]
struct TokenState {
    access_token: Option<String>,
    expires_at: Option<Instant>,
}

impl TokenState {
    fn valid_token(&self) -> Option<&str> {
        let token = self.access_token.as_deref()?;
        let expires_at = self.expires_at?;
        (Instant::now() < expires_at).then_some(token)
    }
}

struct ClientInner {
    config: ClientConfig,
    http: reqwest::Client,
    auth_http: reqwest::Client,
    token: Mutex<TokenState>,
}

/// Shared handle to the JobBOSS2 API.
///
/// Cloning is cheap; all clones share the HTTP connection pools and the
/// token state.
#[derive(Clone)]
pub struct Jb2Client {
    inner: Arc<ClientInner>,
}

impl Jb2Client {
    /// Build a client from a static config.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the API base URL is not an absolute
    /// `http(s)` URL, or if the HTTP clients cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.api_url).map_err(|e| {
            ClientError::Config(format!("Invalid API URL '{}': {e}", config.api_url))
        })?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ClientError::Config(format!(
                "Unsupported API URL scheme '{}'",
                base.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;
        let auth_http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                http,
                auth_http,
                token: Mutex::new(TokenState::default()),
            }),
        })
    }

    /// Make a request against an arbitrary API endpoint.
    ///
    /// The method is validated against the allowed set and the endpoint path
    /// is normalized (see [`crate::endpoint`]) before any network activity.
    /// Successful JSON responses have the JobBOSS2 `Data` envelope unwrapped;
    /// a 204 maps to `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid methods, unsafe endpoint paths, token
    /// acquisition failures, transport failures, and non-2xx responses.
    pub async fn api_call(
        &self,
        method: &str,
        endpoint: &str,
        data: Option<&Value>,
        params: Option<&QueryParams>,
    ) -> Result<Value> {
        let method = endpoint::parse_method(method)?;
        let path = endpoint::normalize_endpoint(endpoint)?;
        self.request(method, &path, data, params).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        data: Option<&Value>,
        params: Option<&QueryParams>,
    ) -> Result<Value> {
        let token = self.access_token().await?;
        let url = format!(
            "{}{path}",
            self.inner.config.api_url.trim_end_matches('/')
        );
        debug!(%method, %path, "jobboss2 api request");

        let mut request = self.inner.http.request(method, &url).bearer_auth(token);
        if let Some(params) = params
            && !params.is_empty()
        {
            request = request.query(&params.to_query_pairs());
        }
        if let Some(data) = data {
            request = request.json(data);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let value = serde_json::from_str(&body).unwrap_or(Value::String(body));
        Ok(extract_data(value))
    }

    async fn access_token(&self) -> Result<String> {
        let mut state = self.inner.token.lock().await;
        if let Some(token) = state.valid_token() {
            return Ok(token.to_string());
        }
        self.fetch_access_token(&mut state).await
    }

    async fn fetch_access_token(&self, state: &mut TokenState) -> Result<String> {
        let response = self
            .inner
            .auth_http
            .post(&self.inner.config.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.inner.config.api_key.as_str()),
                ("client_secret", self.inner.config.api_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Auth(format!("{} - {body}", status.as_u16())));
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Auth(format!("invalid token response: {e}")))?;

        // Half the token lifetime as refresh buffer, capped at five minutes.
        // Subtracting 1 before halving keeps very short-lived tokens usable.
        let buffer = MAX_TOKEN_BUFFER_SECS.min(token.expires_in.saturating_sub(1) / 2);
        state.expires_at =
            Some(Instant::now() + Duration::from_secs(token.expires_in.saturating_sub(buffer)));
        state.access_token = Some(token.access_token.clone());
        Ok(token.access_token)
    }

    /// Spawn a background task that renews the token ahead of expiry.
    ///
    /// Failures only log a warning: the next request re-fetches inline, so
    /// the timer never gates tool dispatch.
    pub fn spawn_refresh_task(&self) -> tokio::task::JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            loop {
                let wait = client
                    .time_until_expiry()
                    .await
                    .unwrap_or(REFRESH_RETRY_INTERVAL)
                    .max(Duration::from_secs(1));
                tokio::time::sleep(wait).await;
                if let Err(e) = client.access_token().await {
                    warn!(error = %e, "background token refresh failed; next request retries inline");
                    tokio::time::sleep(REFRESH_RETRY_INTERVAL).await;
                }
            }
        })
    }

    async fn time_until_expiry(&self) -> Option<Duration> {
        let state = self.inner.token.lock().await;
        state
            .expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    // Convenience wrappers for the most common resources. Everything else is
    // reachable through `api_call` with individually encoded key segments.

    pub async fn get_orders(&self, params: Option<&QueryParams>) -> Result<Value> {
        self.api_call("GET", "orders", None, params).await
    }

    pub async fn get_order_by_id(
        &self,
        order_number: &str,
        params: Option<&QueryParams>,
    ) -> Result<Value> {
        self.api_call(
            "GET",
            &format!("orders/{}", encode_segment(order_number)),
            None,
            params,
        )
        .await
    }

    pub async fn get_customers(&self, params: Option<&QueryParams>) -> Result<Value> {
        self.api_call("GET", "customers", None, params).await
    }

    pub async fn get_customer_by_code(
        &self,
        customer_code: &str,
        params: Option<&QueryParams>,
    ) -> Result<Value> {
        self.api_call(
            "GET",
            &format!("customers/{}", encode_segment(customer_code)),
            None,
            params,
        )
        .await
    }

    pub async fn get_quotes(&self, params: Option<&QueryParams>) -> Result<Value> {
        self.api_call("GET", "quotes", None, params).await
    }

    /// Attendance detail rows for a date range, sorted for report rendering.
    pub async fn get_attendance_report(
        &self,
        start_date: &str,
        end_date: &str,
        employee_codes: Option<&[i64]>,
    ) -> Result<Value> {
        let mut extra = Map::new();
        extra.insert(
            "ticketDate[gte]".to_string(),
            Value::String(start_date.to_string()),
        );
        extra.insert(
            "ticketDate[lte]".to_string(),
            Value::String(end_date.to_string()),
        );
        if let Some(codes) = employee_codes
            && !codes.is_empty()
        {
            let joined = codes
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("|");
            extra.insert("employeeCode[in]".to_string(), Value::String(joined));
        }

        let params = QueryParams {
            sort: Some("employeeCode,ticketDate,attendanceCode".to_string()),
            extra,
            ..QueryParams::default()
        };
        self.api_call("GET", "attendance-ticket-details", None, Some(&params))
            .await
    }
}

fn extract_data(value: Value) -> Value {
    // JobBOSS2 wraps successful payloads in a "Data" property.
    match value {
        Value::Object(mut map) if map.contains_key("Data") => {
            map.remove("Data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::{HeaderMap, Method, StatusCode, Uri};
    use axum::routing::{any, get, post};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;

    #[derive(Clone)]
    struct TestState {
        token_calls: Arc<AtomicUsize>,
        expires_in: u64,
    }

    async fn token_handler(State(state): State<TestState>) -> axum::Json<Value> {
        let n = state.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
        axum::Json(json!({
            "access_token": format!("tok-{n}"),
            "token_type": "bearer",
            "expires_in": state.expires_in,
        }))
    }

    async fn echo_handler(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> axum::Json<Value> {
        axum::Json(json!({
            "Data": {
                "method": method.as_str(),
                "path": uri.path(),
                "query": uri.query().unwrap_or(""),
                "authorization": headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok()),
                "body": String::from_utf8_lossy(&body),
            }
        }))
    }

    struct TestServer {
        base_url: String,
        token_calls: Arc<AtomicUsize>,
        shutdown: Option<tokio::sync::oneshot::Sender<()>>,
        handle: tokio::task::JoinHandle<std::io::Result<()>>,
    }

    impl TestServer {
        async fn start(expires_in: u64, extra_routes: Router<TestState>) -> Self {
            let token_calls = Arc::new(AtomicUsize::new(0));
            let state = TestState {
                token_calls: Arc::clone(&token_calls),
                expires_in,
            };
            let app = Router::new()
                .route("/token", post(token_handler))
                .merge(extra_routes)
                .route("/{*path}", any(echo_handler))
                .with_state(state);

            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            let addr = listener.local_addr().expect("local_addr");
            let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let handle = tokio::spawn(async move { server.await });

            Self {
                base_url: format!("http://{addr}"),
                token_calls,
                shutdown: Some(shutdown_tx),
                handle,
            }
        }

        fn client(&self) -> Jb2Client {
            Jb2Client::new(ClientConfig {
                api_url: self.base_url.clone(),
                api_key: "key".to_string(),
                api_secret: "secret".to_string(),
                token_url: format!("{}/token", self.base_url),
                timeout: Duration::from_secs(5),
            })
            .expect("client")
        }

        async fn stop(mut self) {
            if let Some(tx) = self.shutdown.take() {
                let _ = tx.send(());
            }
            self.handle
                .await
                .expect("server task join")
                .expect("server result");
        }
    }

    #[tokio::test]
    async fn api_call_attaches_bearer_token_and_unwraps_data() {
        let server = TestServer::start(3600, Router::new()).await;
        let client = server.client();

        let result = client
            .api_call("get", "orders", None, None)
            .await
            .expect("api_call");

        assert_eq!(result["path"], "/api/v1/orders");
        assert_eq!(result["method"], "GET");
        assert_eq!(result["authorization"], "Bearer tok-1");
        server.stop().await;
    }

    #[tokio::test]
    async fn keyed_lookup_percent_encodes_the_segment() {
        let server = TestServer::start(3600, Router::new()).await;
        let client = server.client();

        let result = client
            .get_order_by_id("ORD/100 A", None)
            .await
            .expect("get_order_by_id");

        assert_eq!(result["path"], "/api/v1/orders/ORD%2F100%20A");
        server.stop().await;
    }

    #[tokio::test]
    async fn query_params_include_typed_core_and_filters() {
        let server = TestServer::start(3600, Router::new()).await;
        let client = server.client();

        let params: QueryParams = serde_json::from_value(json!({
            "fields": "orderNumber",
            "take": 5,
            "status[in]": "Open|Hold",
        }))
        .expect("params");
        let result = client
            .get_orders(Some(&params))
            .await
            .expect("get_orders");

        let query = result["query"].as_str().unwrap_or_default();
        assert!(query.contains("fields=orderNumber"));
        assert!(query.contains("take=5"));
        assert!(query.contains("status%5Bin%5D=Open%7CHold"));
        server.stop().await;
    }

    #[tokio::test]
    async fn no_content_maps_to_null() {
        let no_content = Router::new().route(
            "/api/v1/estimates/{part}",
            axum::routing::put(|| async { StatusCode::NO_CONTENT }),
        );
        let server = TestServer::start(3600, no_content).await;
        let client = server.client();

        let result = client
            .api_call("PUT", "estimates/P-1", Some(&json!({"partNumber": "P-1"})), None)
            .await
            .expect("put");
        assert_eq!(result, Value::Null);
        server.stop().await;
    }

    #[tokio::test]
    async fn upstream_error_status_surfaces_as_api_error() {
        let failing = Router::new().route(
            "/api/v1/orders/MISSING",
            get(|| async { (StatusCode::NOT_FOUND, "no such order") }),
        );
        let server = TestServer::start(3600, failing).await;
        let client = server.client();

        let err = client
            .api_call("GET", "orders/MISSING", None, None)
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("no such order"));
            }
            other => panic!("expected Api error, got {other}"),
        }
        server.stop().await;
    }

    #[tokio::test]
    async fn traversal_endpoint_fails_before_any_network_access() {
        // Unroutable base URL: reaching the network would fail differently.
        let client = Jb2Client::new(ClientConfig {
            api_url: "http://127.0.0.1:1".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            token_url: "http://127.0.0.1:1/token".to_string(),
            timeout: Duration::from_secs(1),
        })
        .expect("client");

        let err = client.api_call("GET", "../orders", None, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid endpoint path");
    }

    #[tokio::test]
    async fn concurrent_first_calls_fetch_the_token_once() {
        let server = TestServer::start(3600, Router::new()).await;
        let client = server.client();

        let (a, b) = tokio::join!(client.get_orders(None), client.get_customers(None));
        a.expect("orders");
        b.expect("customers");
        assert_eq!(server.token_calls.load(Ordering::SeqCst), 1);
        server.stop().await;
    }

    #[tokio::test]
    async fn expired_token_is_refetched_on_the_next_call() {
        let server = TestServer::start(1, Router::new()).await;
        let client = server.client();

        client.get_orders(None).await.expect("first call");
        tokio::time::sleep(Duration::from_millis(1200)).await;
        let result = client.get_orders(None).await.expect("second call");

        assert_eq!(server.token_calls.load(Ordering::SeqCst), 2);
        assert_eq!(result["authorization"], "Bearer tok-2");
        server.stop().await;
    }
}
