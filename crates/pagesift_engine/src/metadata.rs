use serde::Serialize;

use crate::document::PageDocument;

/// Structured facts harvested from page metadata.
///
/// A field is `Some` only when at least one source in its fallback chain
/// yielded a non-empty trimmed value; never `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraphRecord>,
}

/// Open Graph sub-record. Dropped from [`MetadataRecord`] entirely when
/// every sub-field is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraphRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl OpenGraphRecord {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.kind.is_none()
            && self.image.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.site_name.is_none()
            && self.locale.is_none()
    }
}

/// One step in a fallback chain.
#[derive(Debug, Clone, Copy)]
enum Lookup {
    /// Text content of the first element matching the selector.
    Text(&'static str),
    /// Attribute value of the first element matching the selector.
    Attr(&'static str, &'static str),
    /// The `lang` attribute on the document root.
    RootLang,
}

const TITLE: &[Lookup] = &[
    Lookup::Text("title"),
    Lookup::Attr(r#"meta[property="og:title"]"#, "content"),
    Lookup::Attr(r#"meta[name="twitter:title"]"#, "content"),
];

const DESCRIPTION: &[Lookup] = &[
    Lookup::Attr(r#"meta[name="description"]"#, "content"),
    Lookup::Attr(r#"meta[property="og:description"]"#, "content"),
    Lookup::Attr(r#"meta[name="twitter:description"]"#, "content"),
];

const KEYWORDS: &[Lookup] = &[Lookup::Attr(r#"meta[name="keywords"]"#, "content")];

const AUTHOR: &[Lookup] = &[
    Lookup::Attr(r#"[itemprop="author"] [itemprop="name"]"#, "content"),
    Lookup::Attr(r#"[itemprop="author"]"#, "content"),
    Lookup::Attr(r#"meta[name="author"]"#, "content"),
    Lookup::Attr(r#"meta[property="article:author"]"#, "content"),
    Lookup::Text(r#"a[rel="author"]"#),
];

const PUBLISHED_TIME: &[Lookup] = &[
    Lookup::Attr(r#"[itemprop="datePublished"]"#, "content"),
    Lookup::Attr(r#"meta[property="article:published_time"]"#, "content"),
    Lookup::Attr(r#"meta[name="publish_date"]"#, "content"),
    Lookup::Attr(r#"meta[property="og:article:published_time"]"#, "content"),
    Lookup::Attr("time", "datetime"),
];

const SITE_NAME: &[Lookup] = &[
    Lookup::Attr(r#"meta[property="og:site_name"]"#, "content"),
    Lookup::Attr(r#"[itemprop="publisher"]"#, "content"),
];

const LANGUAGE: &[Lookup] = &[
    Lookup::RootLang,
    Lookup::Attr(r#"meta[property="og:locale"]"#, "content"),
];

/// Evaluate a fallback chain: first step with a non-empty value wins.
fn first_of(doc: &PageDocument, chain: &[Lookup]) -> Option<String> {
    chain.iter().find_map(|lookup| match lookup {
        Lookup::Text(selector) => doc.first_text(selector),
        Lookup::Attr(selector, attr) => doc.first_attr(selector, attr),
        Lookup::RootLang => doc.root_lang(),
    })
}

fn og_property(doc: &PageDocument, property: &str) -> Option<String> {
    doc.first_attr(&format!(r#"meta[property="og:{property}"]"#), "content")
}

/// Harvest a [`MetadataRecord`] from a parsed document. Pure function of
/// the document; absence is a normal outcome, never an error.
pub fn harvest(doc: &PageDocument) -> MetadataRecord {
    let open_graph = OpenGraphRecord {
        title: og_property(doc, "title"),
        kind: og_property(doc, "type"),
        image: og_property(doc, "image")
            .or_else(|| doc.first_attr(r#"[itemprop="thumbnailUrl"]"#, "href")),
        url: og_property(doc, "url").or_else(|| doc.first_attr(r#"[itemprop="url"]"#, "href")),
        description: og_property(doc, "description"),
        site_name: og_property(doc, "site_name"),
        locale: og_property(doc, "locale"),
    };

    MetadataRecord {
        title: first_of(doc, TITLE),
        description: first_of(doc, DESCRIPTION),
        keywords: first_of(doc, KEYWORDS),
        author: first_of(doc, AUTHOR),
        published_time: first_of(doc, PUBLISHED_TIME),
        site_name: first_of(doc, SITE_NAME),
        language: first_of(doc, LANGUAGE),
        open_graph: if open_graph.is_empty() {
            None
        } else {
            Some(open_graph)
        },
    }
}
