//! HTTP transport used by the remote auth gateway.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): a transport that always fails, since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! A transport only fails when no HTTP response was obtained. Non-2xx
//! statuses come back as an ordinary [`HttpReply`] and are interpreted by the
//! gateway.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;

/// Raw status and body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Opaque request collaborator. Futures are `?Send`: the browser is
/// single-threaded and `gloo-net` futures are not `Send`.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// POST `body` as JSON to `url`, optionally with a bearer token.
    ///
    /// # Errors
    ///
    /// Returns a description when the request could not be sent or the
    /// response body could not be read.
    async fn post_json(&self, url: &str, body: &serde_json::Value, bearer: Option<&str>) -> Result<HttpReply, String>;
}

/// Join the API prefix and an endpoint path with exactly one slash.
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// `fetch`-backed transport for the browser.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value, bearer: Option<&str>) -> Result<HttpReply, String> {
        let mut request = gloo_net::http::Request::post(url);
        if let Some(token) = bearer {
            request = request.header("Authorization", &bearer_header(token));
        }
        let resp = request
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        Ok(HttpReply { status, body })
    }
}

/// Transport for builds without a browser; every call fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableTransport;

#[async_trait(?Send)]
impl HttpTransport for UnavailableTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value, bearer: Option<&str>) -> Result<HttpReply, String> {
        let _ = (url, body, bearer);
        Err("not available on server".to_owned())
    }
}
