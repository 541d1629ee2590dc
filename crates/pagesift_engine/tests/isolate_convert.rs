use pagesift_engine::{
    ArticleIsolator, ContentIsolator, Converter, MarkdownConverter, PageDocument,
};
use pretty_assertions::assert_eq;
use url::Url;

const URL: &str = "https://example.com/docs/page";

fn doc(html: &str) -> PageDocument {
    PageDocument::parse(html, URL)
}

fn render(html: &str) -> String {
    MarkdownConverter.render(html, None)
}

fn render_with_base(html: &str, base: &str) -> String {
    let base = Url::parse(base).unwrap();
    MarkdownConverter.render(html, Some(&base))
}

const LONG_TEXT: &str = "This article body is comfortably long enough to pass \
the default substance threshold used by the isolator.";

#[test]
fn isolator_prefers_article_over_body() {
    let html = format!(
        r#"<html><head><title>Title</title></head><body>
            <nav>Home | About | Contact</nav>
            <article><h1>Heading</h1><p>{LONG_TEXT}</p></article>
        </body></html>"#
    );
    let isolated = ArticleIsolator::default().isolate(&doc(&html)).unwrap();
    assert_eq!(isolated.title.as_deref(), Some("Title"));
    assert!(isolated.content_html.contains("Heading"));
    assert!(!isolated.content_html.contains("About"));
}

#[test]
fn isolator_falls_back_to_main_then_body() {
    let html = format!(r#"<html><body><main><p>{LONG_TEXT}</p></main></body></html>"#);
    let isolated = ArticleIsolator::default().isolate(&doc(&html)).unwrap();
    assert!(isolated.content_html.contains("comfortably long"));

    let html = format!(r#"<html><body><p>{LONG_TEXT}</p></body></html>"#);
    assert!(ArticleIsolator::default().isolate(&doc(&html)).is_some());
}

#[test]
fn isolator_reports_none_for_navigation_only_pages() {
    let html = r#"<html><body><nav>Home | About | Login</nav></body></html>"#;
    assert_eq!(ArticleIsolator::default().isolate(&doc(html)), None);
}

#[test]
fn isolator_ignores_script_text_when_judging_substance() {
    let html = r#"<html><body>
        <script>var filler = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";</script>
        <p>thin</p>
    </body></html>"#;
    assert_eq!(ArticleIsolator::default().isolate(&doc(html)), None);
}

#[test]
fn isolator_ignores_iframe_text_when_judging_substance() {
    // An iframe-heavy shell page renders to empty markdown, so its fallback
    // text must not count as substance either.
    let html = r#"<html><body>
        <iframe src="/embed">Your browser does not support frames, follow the
        embedded link instead to read the full story on our partner site.</iframe>
        <p>thin</p>
    </body></html>"#;
    assert_eq!(ArticleIsolator::default().isolate(&doc(html)), None);
}

#[test]
fn isolator_title_falls_back_to_first_heading() {
    let html = format!(
        r#"<html><body><article><h1>From Heading</h1><p>{LONG_TEXT}</p></article></body></html>"#
    );
    let isolated = ArticleIsolator::default().isolate(&doc(&html)).unwrap();
    assert_eq!(isolated.title.as_deref(), Some("From Heading"));
}

#[test]
fn converter_renders_headings_and_paragraphs() {
    assert_eq!(render("<h1>Hello</h1><p>world</p>"), "# Hello\n\nworld");
    assert_eq!(render("<h3>Deep</h3>"), "### Deep");
    assert_eq!(render("<p>A</p><p>B</p>"), "A\n\nB");
}

#[test]
fn converter_renders_lists_and_emphasis() {
    assert_eq!(render("<ul><li>a</li><li>b</li></ul>"), "- a\n- b");
    assert_eq!(render("<p>a <strong>b</strong> c</p>"), "a **b** c");
    assert_eq!(render("<p>an <em>idea</em></p>"), "an *idea*");
    assert_eq!(render("<p>run <code>cargo</code></p>"), "run `cargo`");
}

#[test]
fn converter_resolves_relative_links_against_base() {
    let markdown = render_with_base(
        r#"<p>See <a href="./article">here</a></p>"#,
        "https://example.com/docs/",
    );
    assert_eq!(markdown, "See [here](https://example.com/docs/article)");
}

#[test]
fn converter_degrades_fragment_and_javascript_links_to_text() {
    let markdown = render_with_base(
        r##"<p><a href="#top">Top</a> <a href="javascript:void(0)">Click</a></p>"##,
        "https://example.com/",
    );
    assert_eq!(markdown, "Top Click");
}

#[test]
fn converter_renders_images_with_resolved_src() {
    let markdown = render_with_base(
        r#"<p><img src="/pic.jpg" alt="pic"></p>"#,
        "https://example.com/docs/",
    );
    assert_eq!(markdown, "![pic](https://example.com/pic.jpg)");
}

#[test]
fn converter_skips_script_and_style_content() {
    let markdown = render("<p>keep</p><script>var a = 1;</script><style>.x { color: red }</style>");
    assert_eq!(markdown, "keep");
}

#[test]
fn unknown_tags_degrade_to_their_visible_text() {
    assert_eq!(render("<custom-thing>text</custom-thing>"), "text");
}

#[test]
fn converter_renders_fenced_code_blocks() {
    let markdown = render("<pre>fn main() {}\n</pre>");
    assert_eq!(markdown, "```\nfn main() {}\n```");
}

#[test]
fn conversion_is_deterministic() {
    let html = r#"<article><h2>T</h2><p>Body with a <a href="/x">link</a>.</p></article>"#;
    let first = render_with_base(html, "https://example.com/");
    let second = render_with_base(html, "https://example.com/");
    assert_eq!(first, second);
}
