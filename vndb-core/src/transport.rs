use std::fmt;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{error::TransportError, query::Query};

/// Base of the Kana API; routes are appended as a path segment.
pub const API_ENDPOINT: &str = "https://api.vndb.org/kana/";

static DEFAULT_ENDPOINT: Lazy<Url> = Lazy::new(|| {
    Url::parse(API_ENDPOINT).expect("static api endpoint should parse")
});

/// Entity kind queried by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    VisualNovel,
    Release,
}

impl Route {
    pub fn as_str(self) -> &'static str {
        match self {
            Route::VisualNovel => "vn",
            Route::Release => "release",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of raw records exactly as the API returned them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageResult {
    pub results: Vec<serde_json::Value>,
    /// Whether further pages exist upstream.
    pub more: bool,
}

/// Sends one query to one route and parses one page.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        route: Route,
        query: &Query,
    ) -> Result<PageResult, TransportError>;
}

/// [`Transport`] over HTTPS with `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: Url,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.clone())
    }

    /// Point the transport at another API base, e.g. a sandbox or test server.
    pub fn with_endpoint(endpoint: Url) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(http: reqwest::Client, mut endpoint: Url) -> Self {
        // `Url::join` replaces the last segment unless the base ends in '/'
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn route_url(&self, route: Route) -> Result<Url, TransportError> {
        Ok(self.endpoint.join(route.as_str())?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        route: Route,
        query: &Query,
    ) -> Result<PageResult, TransportError> {
        let url = self.route_url(route)?;
        debug!(%url, page = query.page().get(), "sending VNDB query");

        let response = self.http.post(url).json(query).send().await?;

        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            return serde_json::from_slice::<PageResult>(&body)
                .map_err(TransportError::from);
        }

        // Kana reports errors as plain text bodies
        let message = response
            .text()
            .await
            .ok()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| {
                format!("VNDB request failed with status {}", status)
            });

        match status.as_u16() {
            429 => Err(TransportError::RateLimited),
            code => Err(TransportError::Status {
                status: code,
                message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_join_onto_endpoint() {
        let transport = HttpTransport::new();
        assert_eq!(
            transport.route_url(Route::VisualNovel).unwrap().as_str(),
            "https://api.vndb.org/kana/vn"
        );
        assert_eq!(
            transport.route_url(Route::Release).unwrap().as_str(),
            "https://api.vndb.org/kana/release"
        );
    }

    #[test]
    fn endpoint_without_trailing_slash_is_normalized() {
        let endpoint = Url::parse("http://localhost:8080/kana").unwrap();
        let transport = HttpTransport::with_endpoint(endpoint);
        assert_eq!(
            transport.route_url(Route::Release).unwrap().as_str(),
            "http://localhost:8080/kana/release"
        );
    }

    #[test]
    fn page_result_requires_both_keys() {
        let ok: PageResult =
            serde_json::from_str(r#"{"results": [{"id": "v1"}], "more": true}"#)
                .unwrap();
        assert!(ok.more);
        assert_eq!(ok.results.len(), 1);

        assert!(serde_json::from_str::<PageResult>(r#"{"results": []}"#).is_err());
        assert!(serde_json::from_str::<PageResult>(r#"{"more": false}"#).is_err());
    }
}
