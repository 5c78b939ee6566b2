use std::time::Duration;

use bytes::Bytes;
use futures::Stream;
use log::warn;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, COOKIE};
use reqwest::StatusCode;
use url::Url;

use crate::config::ScrapeConfig;
use crate::dom::Document;
use crate::error::ScrapeError;

const TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP front door: one shared client carrying the configured cookie and
/// user agent on every request.
pub struct SiteClient {
    http: reqwest::Client,
}

impl SiteClient {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|_| ScrapeError::Usage("cookie is not a valid header value".into()))?;
            headers.insert(COOKIE, value);
        }
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .gzip(true)
            .deflate(true)
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| ScrapeError::Usage(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// GETs a page and parses it. Non-200 responses are logged but still
    /// parsed: XenForo error pages are valid documents.
    pub async fn fetch_page(&self, url: &Url) -> Result<Document, ScrapeError> {
        let resp = self.get(url).await?;
        let body = resp
            .text()
            .await
            .map_err(|source| transport(url, source))?;
        Ok(Document::parse(&body))
    }

    /// GETs a file, exposing the response headers before the body is read.
    pub async fn fetch_stream(&self, url: &Url) -> Result<StreamedBody, ScrapeError> {
        let resp = self.get(url).await?;
        Ok(StreamedBody { resp })
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response, ScrapeError> {
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| transport(url, source))?;
        if resp.status() != StatusCode::OK {
            warn!("<{url}> request error: {}", resp.status());
        }
        Ok(resp)
    }
}

fn transport(url: &Url, source: reqwest::Error) -> ScrapeError {
    ScrapeError::Transport {
        url: url.to_string(),
        source,
    }
}

/// A response whose body is still on the wire.
pub struct StreamedBody {
    resp: reqwest::Response,
}

impl StreamedBody {
    /// The content-length response header, when present and numeric.
    pub fn content_length(&self) -> Option<u64> {
        self.resp
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }

    /// The body as a stream of byte chunks.
    pub fn into_chunks(self) -> impl Stream<Item = reqwest::Result<Bytes>> {
        self.resp.bytes_stream()
    }
}
