use gloo::net::http::{Request, RequestBuilder};
use linkboard_core::{Failure, Method, RemoteClient, normalize_response};
use serde_json::Value;

/// `RemoteClient` over the browser's fetch, through `gloo::net`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooClient;

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    }
    .header("Content-Type", "application/json")
}

impl RemoteClient for GlooClient {
    async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Option<Value>, Failure> {
        let request = match body {
            Some(body) => builder(method, path).body(body.to_string()),
            None => builder(method, path).build(),
        }
        .map_err(|e| Failure::transport(format!("failed to build request: {e}")))?;

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, url = %path, error = %e, "fetch failed");
            Failure::transport(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Failure::transport(format!("failed to read response: {e}")))?;

        normalize_response(status, &text)
    }
}
