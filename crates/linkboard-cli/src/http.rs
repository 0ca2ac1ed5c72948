use anyhow::Context;
use linkboard_core::{Failure, Method, RemoteClient, normalize_response};
use serde_json::Value;
use tracing::{debug, warn};

/// `RemoteClient` over a plain reqwest client.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("failed building HTTP client for the catalog service")?;
        Ok(Self { client })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl RemoteClient for HttpClient {
    async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Option<Value>, Failure> {
        let mut request = self
            .client
            .request(to_reqwest(method), path)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await.map_err(|error| {
            warn!(%method, url = %path, error = %error, "catalog request failed");
            Failure::transport(error.to_string())
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|error| {
            warn!(%method, url = %path, error = %error, "failed reading catalog response");
            Failure::transport(error.to_string())
        })?;

        debug!(%method, url = %path, status, bytes = text.len(), "catalog response");
        normalize_response(status, &text)
    }
}
