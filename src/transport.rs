//! HTTP transport: plain GETs with manual, bounded redirect following

use crate::error::TransportError;
use crate::redact::redact_url;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, LOCATION};
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Response to a single GET, redirects not followed
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    /// All `Location` header values, in order
    pub locations: Vec<String>,
    pub body: String,
}

impl RawResponse {
    pub fn is_redirect(&self) -> bool {
        matches!(self.status, 301 | 302)
    }
}

/// GET capability the lookup pipeline depends on.
///
/// Implementations must not follow redirects themselves.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, headers: &[(&str, &str)])
        -> Result<RawResponse, TransportError>;
}

/// [`HttpTransport`] backed by reqwest
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout_ms: u64) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(Policy::none())
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, TransportError> {
        let request_error = |source: reqwest::Error| TransportError::Request {
            url: redact_url(url),
            source: source.without_url(),
        };

        let header_map = header_map(headers)?;
        let response = self
            .client
            .get(url)
            .headers(header_map)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status().as_u16();
        let locations = location_values(response.headers());
        let body = response.text().await.map_err(request_error)?;

        Ok(RawResponse {
            status,
            locations,
            body,
        })
    }
}

/// Build the outgoing header set; a header that cannot be encoded fails the
/// request instead of being left out
fn header_map(headers: &[(&str, &str)]) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let invalid = || TransportError::InvalidHeader {
            name: name.to_string(),
        };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// All `Location` values in order; non-UTF-8 bytes are replaced, not dropped
fn location_values(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(LOCATION)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect()
}

/// GET `url`, following 301/302 responses through their last `Location`
/// value with the same headers, at most `max_redirects` times.
///
/// Returns `None` when a redirect carries no `Location` header.
pub async fn fetch_following_redirects(
    transport: &dyn HttpTransport,
    url: &str,
    headers: &[(&str, &str)],
    max_redirects: usize,
) -> Result<Option<String>, TransportError> {
    let mut current = url.to_string();
    let mut hops = 0;

    loop {
        debug!(method = "GET", url = %redact_url(&current), "fetching");
        let response = transport.get(&current, headers).await?;

        if !response.is_redirect() {
            return Ok(Some(response.body));
        }

        let Some(location) = response.locations.last() else {
            debug!(status = response.status, "redirect without location");
            return Ok(None);
        };

        if hops == max_redirects {
            return Err(TransportError::TooManyRedirects {
                limit: max_redirects,
            });
        }
        hops += 1;

        current = resolve_location(&current, location)?;
    }
}

/// Resolve a possibly relative `Location` against the URL that returned it
fn resolve_location(base: &str, location: &str) -> Result<String, TransportError> {
    let invalid = || TransportError::InvalidRedirect {
        location: redact_url(location),
    };

    match Url::parse(location) {
        Ok(url) => Ok(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base)
            .and_then(|b| b.join(location))
            .map(|u| u.to_string())
            .map_err(|_| invalid()),
        Err(_) => Err(invalid()),
    }
}
