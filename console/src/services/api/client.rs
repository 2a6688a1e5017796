//! # API Client
//!
//! HTTP client for the backend admin API.
//!
//! Every call goes through [`ApiClient::execute`]: attach the bearer token,
//! send, and turn the response into either a JSON value or an [`AppError`].
//! A 401 additionally drops the session, both in memory and in the store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::{AdminProfile, Paginated};

use crate::core::error::{AppError, Result};
use crate::services::session::{Session, SessionStore};

/// Prefix of every admin route under the API base URL
pub const ADMIN_PREFIX: &str = "/admin";

/// HTTP client for the admin API.
///
/// Owns the [`Session`]: the token attached to requests is read from here,
/// and only the auth endpoints (plus the 401 path) write to it.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    session: RwLock<Session>,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:8000/api`).
    ///
    /// The persisted session is loaded from `store` immediately. No timeout is
    /// applied unless one is given.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let session = store.load()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        tracing::debug!(
            base_url = %base_url,
            authenticated = session.token.is_some(),
            "Admin API client created"
        );

        Ok(Self {
            client,
            base_url,
            session: RwLock::new(session),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.session.read().token.clone()
    }

    pub(crate) fn persist_token(&self, token: &str) -> Result<()> {
        self.store.store_token(token)?;
        self.session.write().token = Some(token.to_string());
        Ok(())
    }

    pub(crate) fn persist_profile(&self, profile: &AdminProfile) -> Result<()> {
        self.store.store_profile(profile)?;
        self.session.write().profile = Some(profile.clone());
        Ok(())
    }

    /// Drop token and profile. The in-memory session is always cleared, even
    /// when the store fails.
    pub(crate) fn clear_session(&self) -> Result<()> {
        *self.session.write() = Session::default();
        self.store.clear()
    }

    fn url(&self, path: &str, query: &[(&'static str, String)]) -> String {
        format!("{}{}", self.base_url, admin_path(path, query))
    }

    // ---- verbs ----

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&'static str, String)]) -> Result<T> {
        let value = self.send(Method::GET, path, query, None::<&()>).await?;
        decode(value)
    }

    /// GET a list endpoint and read its envelope
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        items_key: &'static str,
        limit: u32,
    ) -> Result<Paginated<T>> {
        let value = self.send(Method::GET, path, query, None::<&()>).await?;
        let page = Paginated::from_value(value, items_key, limit)?;
        tracing::debug!(items = page.items.len(), page = page.page, pages = page.pages, "Page received");
        Ok(page)
    }

    /// PUT with parameters in the query string and no body
    pub(crate) async fn put_query<T: DeserializeOwned>(&self, path: &str, query: &[(&'static str, String)]) -> Result<T> {
        let value = self.send(Method::PUT, path, query, None::<&()>).await?;
        decode(value)
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let value = self.send(Method::PUT, path, &[], Some(body)).await?;
        decode(value)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let value = self.send(Method::POST, path, &[], Some(body)).await?;
        decode(value)
    }

    /// POST a credentials form. A 401 here is a rejected login, not an
    /// expired session, so the current session is left alone.
    pub(crate) async fn post_credentials<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.client.post(self.url(path, &[])).json(body);
        let value = self.execute(builder, &Method::POST, path, false).await?;
        decode(value)
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.send(Method::POST, path, &[], None::<&()>).await?;
        decode(value)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<Value>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(path, query);
        let mut builder = self.client.request(method.clone(), url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder, &method, path, true).await
    }

    /// Send one request and classify the outcome.
    ///
    /// With `clear_on_unauthorized` a 401 also drops the stored session.
    async fn execute(
        &self,
        builder: RequestBuilder,
        method: &Method,
        path: &str,
        clear_on_unauthorized: bool,
    ) -> Result<Value> {
        let request_id = uuid::Uuid::new_v4();
        let start = Instant::now();

        let builder = match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder
            .header("X-Request-ID", request_id.to_string())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    error = %e,
                    "Admin API network error"
                );
                AppError::Transport(e)
            })?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        if status.is_success() {
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = status.as_u16(),
                duration_ms,
                "Admin API request succeeded"
            );
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            return serde_json::from_slice(&bytes).map_err(|e| {
                tracing::error!(request_id = %request_id, path = %path, error = %e, "Response parse error");
                AppError::Decode(e.to_string())
            });
        }

        let detail = error_detail(&bytes);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                request_id = %request_id,
                method = %method,
                path = %path,
                duration_ms,
                clear_session = clear_on_unauthorized,
                "Admin API rejected credentials"
            );
            if clear_on_unauthorized {
                if let Err(e) = self.clear_session() {
                    tracing::error!(error = %e, "Failed to clear session after 401");
                }
            }
            return Err(AppError::Unauthorized { detail });
        }

        tracing::warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or(""),
            duration_ms,
            "Admin API request failed"
        );
        Err(AppError::Server {
            status: status.as_u16(),
            detail,
        })
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// `/admin{path}?k=v&...` with values percent-encoded, pairs kept in order.
pub fn admin_path(path: &str, query: &[(&'static str, String)]) -> String {
    let mut out = String::with_capacity(ADMIN_PREFIX.len() + path.len() + 16 * query.len());
    out.push_str(ADMIN_PREFIX);
    out.push_str(path);

    for (i, (key, value)) in query.iter().enumerate() {
        out.push(if i == 0 { '?' } else { '&' });
        out.push_str(key);
        out.push('=');
        out.push_str(&urlencoding::encode(value));
    }

    out
}

/// Percent-encode one path segment (an id taken from the caller)
pub(crate) fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

/// Human-readable reason from an error body.
///
/// Understands FastAPI's `{"detail": "..."}`, its validation form
/// `{"detail": [{"msg": "..."}]}`, and the `error` / `message` keys.
pub fn error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let object = value.as_object()?;

    if let Some(detail) = object.get("detail") {
        match detail {
            Value::String(s) => return Some(s.clone()),
            Value::Array(entries) => {
                let messages: Vec<&str> = entries
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                    .collect();
                if !messages.is_empty() {
                    return Some(messages.join("; "));
                }
            }
            Value::Object(inner) => {
                if let Some(message) = inner.get("message").and_then(Value::as_str) {
                    return Some(message.to_string());
                }
            }
            _ => {}
        }
    }

    ["error", "message"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
