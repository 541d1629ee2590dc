use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Selector};

use crate::document::PageDocument;

/// Outcome of content isolation: the readable subtree as a serializable
/// HTML fragment plus the title derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolatedContent {
    pub content_html: String,
    pub title: Option<String>,
}

pub trait ContentIsolator: Send + Sync {
    /// Best-guess readable subtree, or `None` when the page holds no
    /// reasonably substantial article-like content (navigation-only pages,
    /// login walls and the like).
    fn isolate(&self, doc: &PageDocument) -> Option<IsolatedContent>;
}

/// Readability-like isolator: prefers the first `article` element, then
/// `main`, then `body`. The chosen subtree counts as substantial only when
/// it carries at least `min_text_len` characters of visible text.
#[derive(Debug, Clone)]
pub struct ArticleIsolator {
    min_text_len: usize,
}

impl ArticleIsolator {
    pub const DEFAULT_MIN_TEXT_LEN: usize = 80;

    pub fn new(min_text_len: usize) -> Self {
        Self { min_text_len }
    }
}

impl Default for ArticleIsolator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_TEXT_LEN)
    }
}

impl ContentIsolator for ArticleIsolator {
    fn isolate(&self, doc: &PageDocument) -> Option<IsolatedContent> {
        let root = ["article", "main", "body"]
            .iter()
            .find_map(|selector| doc.first_element(selector))?;

        if visible_text_len(*root) < self.min_text_len {
            return None;
        }

        let title = doc.first_text("title").or_else(|| first_heading(root));
        Some(IsolatedContent {
            content_html: root.inner_html(),
            title,
        })
    }
}

/// Character count of the subtree's visible text, whitespace collapsed.
/// Script and style text does not count toward substance.
fn visible_text_len(node: NodeRef<'_, Node>) -> usize {
    match node.value() {
        Node::Text(text) => text.split_whitespace().map(str::len).sum::<usize>(),
        Node::Element(element)
            if matches!(
                element.name(),
                "script" | "style" | "noscript" | "iframe" | "template"
            ) =>
        {
            0
        }
        _ => node.children().map(visible_text_len).sum(),
    }
}

fn first_heading(root: ElementRef<'_>) -> Option<String> {
    let sel = Selector::parse("h1").ok()?;
    let heading = root.select(&sel).next()?;
    let text = heading.text().collect::<String>();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
