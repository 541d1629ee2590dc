//! Single-shot web page extraction: fetch one URL, isolate its readable
//! content, convert that content to markdown, and optionally harvest
//! SEO/Open Graph metadata via prioritized fallback chains.
mod convert;
mod decode;
mod document;
mod fetch;
mod isolate;
mod metadata;
mod pipeline;
mod types;

pub use convert::{Converter, MarkdownConverter};
pub use decode::decode_body;
pub use document::PageDocument;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use isolate::{ArticleIsolator, ContentIsolator, IsolatedContent};
pub use metadata::{harvest, MetadataRecord, OpenGraphRecord};
pub use pipeline::{extract, Pipeline};
pub use types::{ExtractionResult, FailureKind, FetchError};
