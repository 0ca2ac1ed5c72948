use std::fmt;
use std::rc::Rc;

use linkboard_shared::{
    Category, CategoryCreate, CategoryId, ErrorBody, Link, LinkId, LinkPayload,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform error value for every non-success outcome of a remote call.
///
/// `Display` is the message shown to the user, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// No response was obtained.
    #[error("{0}")]
    Transport(String),
    /// The service answered with a non-success status, or with a body the
    /// client could not decode.
    #[error("{0}")]
    Application(String),
}

impl Failure {
    pub fn transport(message: impl Into<String>) -> Self {
        Failure::Transport(message.into())
    }

    pub fn application(message: impl Into<String>) -> Self {
        Failure::Application(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Failure::Transport(message) | Failure::Application(message) => message,
        }
    }
}

/// One-shot request against the catalog service.
///
/// Implementations send `Content-Type: application/json`, serialize `body`
/// when present, and hand the raw status and body text to
/// [`normalize_response`]. No retries, no timeout, no caching.
#[allow(async_fn_in_trait)]
pub trait RemoteClient {
    async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Option<Value>, Failure>;
}

impl<T: RemoteClient + ?Sized> RemoteClient for Rc<T> {
    async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Option<Value>, Failure> {
        (**self).call(path, method, body).await
    }
}

impl<T: RemoteClient + ?Sized> RemoteClient for &T {
    async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Option<Value>, Failure> {
        (**self).call(path, method, body).await
    }
}

/// Turns a status code and response body into the client's result contract.
///
/// 204 carries no payload. Any other 2xx must be JSON (an empty body counts
/// as no payload). Everything else fails with the body's `error` field, or
/// [`GENERIC_FAILURE_MESSAGE`] when the field is missing, empty, or the body
/// is not JSON at all.
pub fn normalize_response(status: u16, body: &str) -> Result<Option<Value>, Failure> {
    if status == 204 {
        return Ok(None);
    }

    if (200..300).contains(&status) {
        if body.trim().is_empty() {
            return Ok(None);
        }
        return serde_json::from_str(body)
            .map(Some)
            .map_err(|e| Failure::application(format!("invalid JSON response: {e}")));
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());

    warn!(status, message = %message, "catalog service rejected request");
    Err(Failure::application(message))
}

/// Typed wrapper around a [`RemoteClient`], one method per catalog endpoint.
#[derive(Debug, Clone)]
pub struct CatalogApi<C> {
    remote: C,
    base: String,
}

impl<C: RemoteClient> CatalogApi<C> {
    pub fn new(remote: C, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { remote, base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn remote(&self) -> &C {
        &self.remote
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, Failure> {
        let url = self.url(path);
        debug!(%method, url = %url, has_body = body.is_some(), "calling catalog service");
        self.remote.call(&url, method, body.as_ref()).await
    }

    async fn send_for<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, Failure> {
        let value = self
            .send(method, path, body)
            .await?
            .ok_or_else(|| Failure::application(format!("{method} {path} returned no content")))?;
        serde_json::from_value(value)
            .map_err(|e| Failure::application(format!("unexpected response for {method} {path}: {e}")))
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, Failure> {
        self.send_for(Method::Get, "/api/categories", None).await
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, Failure> {
        let body = encode(&CategoryCreate {
            name: name.to_string(),
        })?;
        self.send_for(Method::Post, "/api/categories", Some(body)).await
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<(), Failure> {
        self.send(Method::Delete, &format!("/api/categories/{id}"), None)
            .await
            .map(|_| ())
    }

    pub async fn list_links(&self) -> Result<Vec<Link>, Failure> {
        self.send_for(Method::Get, "/api/links", None).await
    }

    pub async fn create_link(&self, payload: &LinkPayload) -> Result<Link, Failure> {
        let body = encode(payload)?;
        self.send_for(Method::Post, "/api/links", Some(body)).await
    }

    pub async fn update_link(&self, id: LinkId, payload: &LinkPayload) -> Result<Link, Failure> {
        let body = encode(payload)?;
        self.send_for(Method::Put, &format!("/api/links/{id}"), Some(body))
            .await
    }

    pub async fn delete_link(&self, id: LinkId) -> Result<(), Failure> {
        self.send(Method::Delete, &format!("/api/links/{id}"), None)
            .await
            .map(|_| ())
    }
}

fn encode<T: Serialize>(payload: &T) -> Result<Value, Failure> {
    serde_json::to_value(payload)
        .map_err(|e| Failure::application(format!("failed to encode request: {e}")))
}
