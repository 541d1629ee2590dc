use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::decode::decode_body;
use crate::types::{FailureKind, FetchError};

/// Transport policy for the document provider. Timeouts, redirect and size
/// limits, and the retry budget all live here, opaque to the orchestrator.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
    /// Extra attempts after a timeout or network failure.
    pub retry_attempts: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
            user_agent: "Mozilla/5.0 (compatible; pagesift/0.1)".to_string(),
            retry_attempts: 2,
        }
    }
}

/// Resolves a URL to decoded HTML text or a transport error. The only
/// suspending step of the pipeline.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(
        &self,
        url: &str,
        redirect_counter: Arc<AtomicUsize>,
    ) -> Result<reqwest::Client, FetchError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count >= redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(policy)
            .user_agent(self.settings.user_agent.as_str())
            .build()
            .map_err(|err| FetchError::new(url, FailureKind::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(url, FailureKind::InvalidUrl, err.to_string()))?;
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(url, redirect_counter.clone())?;

        let response = client
            .get(parsed)
            .send()
            .await
            .map_err(|err| map_reqwest_error(url, &err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                url,
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    url,
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    url,
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| map_reqwest_error(url, &err))?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    url,
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let (html, encoding) = decode_body(&bytes, content_type.as_deref());
        log::debug!(
            "fetched {url}: {len} bytes decoded as {encoding}",
            len = bytes.len()
        );
        Ok(html)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url).await {
                Ok(html) => return Ok(html),
                Err(err) if attempt < self.settings.retry_attempts && err.kind.is_transient() => {
                    attempt += 1;
                    log::warn!(
                        "fetch attempt {attempt} for {url} failed ({kind}), retrying",
                        kind = err.kind
                    );
                    tokio::time::sleep(Duration::from_millis(250 * attempt as u64)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn map_reqwest_error(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(url, FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(url, FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(url, FailureKind::Network, err.to_string())
}
