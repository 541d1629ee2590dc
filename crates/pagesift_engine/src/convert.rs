use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};
use url::Url;

use crate::document::resolve_reference;

/// Renders an HTML fragment to markdown text.
///
/// Total and deterministic over well-formed fragments: unknown tags degrade
/// to their visible text, conversion never fails.
pub trait Converter: Send + Sync {
    fn render(&self, html: &str, base_url: Option<&Url>) -> String;
}

/// Tree-walking markdown renderer. Links and images are resolved against
/// the page base URL; fragment-only and `javascript:` references degrade to
/// plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownConverter;

impl Converter for MarkdownConverter {
    fn render(&self, html: &str, base_url: Option<&Url>) -> String {
        let fragment = Html::parse_fragment(html);
        let mut out = MarkdownBuilder::new();
        for child in fragment.root_element().children() {
            visit_node(child, base_url, &mut out);
        }
        out.finish()
    }
}

fn visit_node(node: NodeRef<'_, Node>, base: Option<&Url>, out: &mut MarkdownBuilder) {
    match node.value() {
        Node::Text(text) => out.append_text(&text.text),
        Node::Element(_) => {
            if let Some(element) = ElementRef::wrap(node) {
                visit_element(element, base, out);
            }
        }
        _ => {
            for child in node.children() {
                visit_node(child, base, out);
            }
        }
    }
}

fn visit_element(element: ElementRef<'_>, base: Option<&Url>, out: &mut MarkdownBuilder) {
    let tag = element.value().name().to_ascii_lowercase();
    match tag.as_str() {
        "a" => render_anchor(element, base, out),
        "img" => render_image(element, base, out),
        "br" => out.ensure_newline(),
        "hr" => {
            out.ensure_blank_line();
            out.push_raw("---");
            out.ensure_blank_line();
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = usize::from(tag.as_bytes()[1] - b'0');
            out.ensure_blank_line();
            out.push_raw(&"#".repeat(level));
            out.push_raw(" ");
            visit_children(element, base, out);
            out.ensure_blank_line();
        }
        "li" => {
            out.ensure_newline();
            out.push_raw("- ");
            visit_children(element, base, out);
            out.ensure_newline();
        }
        "ul" | "ol" | "p" | "div" | "section" | "article" | "header" | "footer" | "figure"
        | "figcaption" | "table" | "blockquote" | "address" => {
            out.ensure_blank_line();
            visit_children(element, base, out);
            out.ensure_blank_line();
        }
        "tr" => {
            out.ensure_newline();
            visit_children(element, base, out);
            out.ensure_newline();
        }
        "td" | "th" => {
            visit_children(element, base, out);
            out.append_text(" ");
        }
        "strong" | "b" => {
            out.push_raw("**");
            visit_children(element, base, out);
            out.push_raw("**");
        }
        "em" | "i" => {
            out.push_raw("*");
            visit_children(element, base, out);
            out.push_raw("*");
        }
        "pre" => {
            let text = element.text().collect::<String>();
            out.ensure_blank_line();
            out.push_raw("```\n");
            out.push_raw(text.trim_matches('\n'));
            out.push_raw("\n```");
            out.ensure_blank_line();
        }
        "code" => {
            out.push_raw("`");
            visit_children(element, base, out);
            out.push_raw("`");
        }
        // Scripting and presentation-only subtrees carry no readable text.
        "script" | "style" | "noscript" | "iframe" | "template" => {}
        _ => visit_children(element, base, out),
    }
}

fn visit_children(element: ElementRef<'_>, base: Option<&Url>, out: &mut MarkdownBuilder) {
    for child in element.children() {
        visit_node(child, base, out);
    }
}

fn render_anchor(element: ElementRef<'_>, base: Option<&Url>, out: &mut MarkdownBuilder) {
    let href = element.value().attr("href").map(str::trim);
    let start = out.len();
    visit_children(element, base, out);

    let Some(url) = href.and_then(|raw| resolve_reference(raw, base)) else {
        // Unresolvable reference: keep the link text as plain text.
        return;
    };
    let text = out.take_from(start);
    let text = text.trim();
    if !text.is_empty() {
        out.push_raw(&format!("[{text}]({url})"));
    }
}

fn render_image(element: ElementRef<'_>, base: Option<&Url>, out: &mut MarkdownBuilder) {
    let Some(src) = element.value().attr("src").map(str::trim) else {
        return;
    };
    if let Some(url) = resolve_reference(src, base) {
        let alt = element.value().attr("alt").unwrap_or("").trim().to_string();
        out.push_raw(&format!("![{alt}]({url})"));
    }
}

/// Accumulates markdown while collapsing runs of input whitespace.
struct MarkdownBuilder {
    out: String,
}

impl MarkdownBuilder {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn finish(self) -> String {
        self.out.trim().to_string()
    }

    fn len(&self) -> usize {
        self.out.len()
    }

    /// Remove and return everything written since `start`.
    fn take_from(&mut self, start: usize) -> String {
        let tail = self.out[start..].to_string();
        self.out.truncate(start);
        tail
    }

    /// Append document text, collapsing whitespace runs to a single space.
    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                match self.out.chars().next_back() {
                    None | Some(' ') | Some('\n') => {}
                    _ => self.out.push(' '),
                }
            } else {
                self.out.push(ch);
            }
        }
    }

    /// Append markdown syntax verbatim.
    fn push_raw(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn ensure_newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    /// Separate block-level content with one blank line.
    fn ensure_blank_line(&mut self) {
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }
}
