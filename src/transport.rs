//! HTTP transport for the portal backend.
//!
//! Owns the shared `reqwest::Client`, attaches auth headers, applies the
//! timeout tiers, and classifies failures into [`ApiError`] kinds. Knows
//! nothing about business shapes; bodies come back as raw
//! `serde_json::Value` for the normalizer.

use crate::auth::{AuthStore, LoginRedirect};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use reqwest::{Client, Method, StatusCode, multipart::Form};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Request payload variants. Multipart bodies select the upload timeout
/// tier so large PDF uploads are never aborted by the default timeout.
enum Body {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// Shared HTTP client for all portal API calls.
pub struct Transport {
    http: Client,
    cfg: ApiConfig,
    auth: Arc<dyn AuthStore>,
    redirect: Arc<dyn LoginRedirect>,
    /// Set while a session-expiry episode is in flight, so concurrent 401s
    /// cannot cause a redirect storm. Cleared again by the next successful
    /// authenticated request, so a later expiry redirects normally.
    redirected: AtomicBool,
}

impl Transport {
    pub fn new(cfg: ApiConfig, auth: Arc<dyn AuthStore>, redirect: Arc<dyn LoginRedirect>) -> Self {
        Self {
            http: Client::new(),
            cfg,
            auth,
            redirect,
            redirected: AtomicBool::new(false),
        }
    }

    pub async fn get(&self, path: &str) -> ApiResult<Value> {
        self.send(Method::GET, path, Body::Empty).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> ApiResult<Value> {
        self.send(Method::POST, path, Body::Json(body.clone())).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> ApiResult<Value> {
        self.send(Method::PUT, path, Body::Json(body.clone())).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.send(Method::DELETE, path, Body::Empty).await
    }

    /// Multipart POST. The content type is left to reqwest so the multipart
    /// boundary is set by the runtime.
    pub async fn post_multipart(&self, path: &str, form: Form) -> ApiResult<Value> {
        self.send(Method::POST, path, Body::Multipart(form)).await
    }

    /// Multipart PUT, used when replacing an attached file.
    pub async fn put_multipart(&self, path: &str, form: Form) -> ApiResult<Value> {
        self.send(Method::PUT, path, Body::Multipart(form)).await
    }

    async fn send(&self, method: Method, path: &str, body: Body) -> ApiResult<Value> {
        let url = self.url(path);
        let timeout = match body {
            Body::Multipart(_) => self.cfg.upload_timeout(),
            _ => self.cfg.default_timeout(),
        };

        let mut req = self.http.request(method.clone(), url.as_str()).timeout(timeout);
        for (name, value) in &self.cfg.default_headers {
            req = req.header(name, value);
        }
        // Token absence is not an error; public endpoints work without one.
        let has_token = match self.auth.token() {
            Some(token) => {
                req = req.bearer_auth(token);
                true
            }
            None => false,
        };
        req = match body {
            Body::Empty => req,
            Body::Json(v) => req.json(&v),
            Body::Multipart(form) => req.multipart(form),
        };

        let resp = req.send().await.map_err(classify_send_error)?;
        let status = resp.status();
        tracing::info!("{method} {url} -> {status}");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.session_expired();
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_from_status(status, &text));
        }

        // A 2xx on an authenticated call means the session is live again;
        // re-arm the redirect guard for the next expiry episode.
        if has_token {
            self.redirected.store(false, Ordering::SeqCst);
        }

        // DELETE and publish endpoints may answer with an empty body.
        let text = resp.text().await.unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("non-JSON success body from {url}: {e}");
            ApiError::MalformedResponse { keys: Vec::new() }
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.cfg.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Fire the login redirect at most once per expiry episode. The
    /// redirect implementation owns the "already on the login page" check.
    fn session_expired(&self) {
        if !self.redirected.swap(true, Ordering::SeqCst) {
            tracing::warn!("session rejected by backend, redirecting to login");
            self.redirect.redirect_to_login();
        }
    }
}

/// Map a pre-response reqwest failure onto the error taxonomy.
fn classify_send_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout(e.to_string())
    } else if e.is_connect() {
        ApiError::NetworkUnavailable(e.to_string())
    } else {
        ApiError::Unknown(e.to_string())
    }
}

/// Map a non-2xx response onto the error taxonomy, mining the body for a
/// server-provided message and, on validation rejections, per-field errors.
fn error_from_status(status: StatusCode, body: &str) -> ApiError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        let field_errors = parsed
            .as_ref()
            .and_then(|v| v.get("errors"))
            .map(field_error_map)
            .unwrap_or_default();
        return ApiError::ValidationFailed { field_errors };
    }

    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
        StatusCode::FORBIDDEN => ApiError::Forbidden(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        s if s.is_server_error() => ApiError::ServerError {
            status: s.as_u16(),
            message,
        },
        _ => ApiError::Unknown(message),
    }
}

/// Flatten a server `errors` object into `field -> [messages]`. Values may
/// be a single string or an array of strings, depending on the endpoint.
fn field_error_map(errors: &Value) -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();
    if let Some(obj) = errors.as_object() {
        for (field, value) in obj {
            let messages = match value {
                Value::String(s) => vec![s.clone()],
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                _ => Vec::new(),
            };
            map.insert(field.clone(), messages);
        }
    }
    map
}
