use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::metadata::MetadataRecord;

/// Final output of one extraction call.
///
/// `content` is the empty string (not absent) when no primary content could
/// be isolated; callers must treat that as "extraction yielded nothing",
/// never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "seo", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataRecord>,
}

/// Transport failure: the page could not be retrieved at all. Fatal for the
/// extraction call; carries the requested URL and the underlying cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch {url}: {message}")]
pub struct FetchError {
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(url: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl FailureKind {
    /// Transient failures are worth another attempt at the provider layer.
    pub(crate) fn is_transient(&self) -> bool {
        matches!(self, FailureKind::Timeout | FailureKind::Network)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
