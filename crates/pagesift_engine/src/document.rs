use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A parsed HTML page bound to the URL it was fetched from.
///
/// Every query returns `Option<String>` that is `None` for a missing
/// element, a missing attribute, or a value that trims to empty. Keeping
/// the absent-vs-empty distinction at the lookup layer is what lets the
/// metadata fallback chains short-circuit correctly.
pub struct PageDocument {
    html: Html,
    base_url: Option<Url>,
}

impl PageDocument {
    pub fn parse(html: &str, url: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            base_url: Url::parse(url).ok(),
        }
    }

    /// Base URL used to resolve relative references, if the page URL parsed.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// First element matching `selector`, in document order.
    pub fn first_element(&self, selector: &str) -> Option<ElementRef<'_>> {
        let sel = Selector::parse(selector).ok()?;
        self.html.select(&sel).next()
    }

    /// Trimmed text content of the first element matching `selector`.
    pub fn first_text(&self, selector: &str) -> Option<String> {
        let element = self.first_element(selector)?;
        non_empty(element.text().collect::<String>())
    }

    /// Trimmed value of `attr` on the first element matching `selector`.
    pub fn first_attr(&self, selector: &str, attr: &str) -> Option<String> {
        let element = self.first_element(selector)?;
        non_empty(element.value().attr(attr)?.to_string())
    }

    /// The `lang` attribute of the document root element.
    pub fn root_lang(&self) -> Option<String> {
        non_empty(self.html.root_element().value().attr("lang")?.to_string())
    }

    /// Resolve a possibly-relative reference against the page base URL.
    pub fn resolve(&self, reference: &str) -> Option<Url> {
        resolve_reference(reference, self.base_url.as_ref())
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Resolve `reference` against `base`. Fragment-only, query-only and
/// `javascript:` references never resolve.
pub(crate) fn resolve_reference(reference: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('?') {
        return None;
    }
    if trimmed.to_ascii_lowercase().starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.and_then(|base| base.join(trimmed).ok())
}
