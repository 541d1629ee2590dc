use std::sync::Arc;

use crate::convert::{Converter, MarkdownConverter};
use crate::document::PageDocument;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::isolate::{ArticleIsolator, ContentIsolator};
use crate::metadata;
use crate::types::{ExtractionResult, FetchError};

/// The extraction pipeline: fetch, parse, harvest, isolate, render.
///
/// Linear and stateless; independent calls may run concurrently without
/// coordination. Only transport failure crosses this boundary as an error;
/// failed isolation and absent metadata are data, not failures.
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    isolator: Arc<dyn ContentIsolator>,
    converter: Arc<dyn Converter>,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        isolator: Arc<dyn ContentIsolator>,
        converter: Arc<dyn Converter>,
    ) -> Self {
        Self {
            fetcher,
            isolator,
            converter,
        }
    }

    /// Production pipeline: reqwest fetcher, readability-like isolator,
    /// tree-walking markdown converter.
    pub fn with_settings(settings: FetchSettings) -> Self {
        Self::new(
            Arc::new(ReqwestFetcher::new(settings)),
            Arc::new(ArticleIsolator::default()),
            Arc::new(MarkdownConverter),
        )
    }

    pub async fn extract(
        &self,
        url: &str,
        include_metadata: bool,
    ) -> Result<ExtractionResult, FetchError> {
        let html = self.fetcher.fetch(url).await?;
        let doc = PageDocument::parse(&html, url);

        let metadata = if include_metadata {
            Some(metadata::harvest(&doc))
        } else {
            None
        };

        let (content, title) = match self.isolator.isolate(&doc) {
            Some(isolated) => {
                let markdown = self.converter.render(&isolated.content_html, doc.base_url());
                // The isolator's title is derived from the content root
                // itself and wins over anything harvested from header
                // metadata, even when the rendered body comes out empty.
                (markdown, isolated.title)
            }
            None => {
                log::debug!("no substantial content isolated for {url}");
                let fallback = metadata.as_ref().and_then(|m| m.title.clone());
                (String::new(), fallback)
            }
        };

        Ok(ExtractionResult {
            content,
            title,
            metadata,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::with_settings(FetchSettings::default())
    }
}

/// Extract one page with the default pipeline.
pub async fn extract(url: &str, include_metadata: bool) -> Result<ExtractionResult, FetchError> {
    Pipeline::default().extract(url, include_metadata).await
}
