// ninja-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-memory transport
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, header};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::error::decode_body;
use crate::upload::{IMAGE_FIELD, ImageUpload};
use crate::{ClientError, ClientResult};

use super::http::HttpClient;

/// Oneshot HTTP client (in-memory calls)
///
/// Drives an axum `Router` through Tower's `oneshot`, so a backend that
/// lives in the same process (a mock, an embedded server) is reached with
/// zero network overhead.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use ninja_client::OneshotHttpClient;
///
/// let router: Router = build_backend().with_state(state);
/// let client = OneshotHttpClient::new(router);
///
/// let coupons: Vec<Coupon> = client.get("api/locations/L1/coupons").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Option<String>,
}

impl OneshotHttpClient {
    /// # Arguments
    /// * `router` - a Router with state already applied
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: None,
        }
    }

    fn request(
        &self,
        method: http::Method,
        path: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> ClientResult<Request<Body>> {
        let uri = format!("/{}", path.trim_start_matches('/'));
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = &self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    fn json_request<B: serde::Serialize>(
        &self,
        method: http::Method,
        path: &str,
        body: &B,
    ) -> ClientResult<Request<Body>> {
        let bytes = serde_json::to_vec(body)?;
        self.request(method, path, Some("application/json"), Body::from(bytes))
    }

    /// Execute the request and handle the response
    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes).to_string();
            return Err(ClientError::from_status(status, text));
        }

        decode_body(&body_bytes)
    }
}

/// Encode a single-part `multipart/form-data` body.
/// Returns the content type (with boundary) and the body bytes.
fn multipart_body(field: &str, file: &ImageUpload) -> (String, Vec<u8>) {
    let boundary = format!("ninja-{}", uuid::Uuid::new_v4().simple());
    let mut body = Vec::with_capacity(file.bytes.len() + 256);

    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            file.file_name, file.content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={boundary}"), body)
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(http::Method::GET, path, None, Body::empty())?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.json_request(http::Method::POST, path, body)?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.json_request(http::Method::PUT, path, body)?;
        self.execute(request).await
    }

    async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(http::Method::PATCH, path, None, Body::empty())?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(http::Method::DELETE, path, None, Body::empty())?;
        self.execute(request).await
    }

    async fn upload<T: DeserializeOwned>(&self, path: &str, file: &ImageUpload) -> ClientResult<T> {
        let (content_type, bytes) = multipart_body(IMAGE_FIELD, file);
        let request = self.request(http::Method::POST, path, Some(&content_type), Body::from(bytes))?;
        self.execute(request).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}
