use std::fs;
use std::io::{self, Write};
use std::path::Path;

use pagesift_engine::ExtractionResult;

/// Prepend a front-matter block to the markdown body: `key: "value"` lines
/// for each present metadata field, with a nested block for the Open Graph
/// sub-record. Without metadata the body is returned as-is.
pub fn with_front_matter(result: &ExtractionResult) -> String {
    let Some(metadata) = result.metadata.as_ref() else {
        return result.content.clone();
    };

    let mut block = String::from("---\n");
    push_field(&mut block, "", "title", result.title.as_deref());
    push_field(&mut block, "", "description", metadata.description.as_deref());
    push_field(&mut block, "", "keywords", metadata.keywords.as_deref());
    push_field(&mut block, "", "author", metadata.author.as_deref());
    push_field(
        &mut block,
        "",
        "publishedTime",
        metadata.published_time.as_deref(),
    );
    push_field(&mut block, "", "siteName", metadata.site_name.as_deref());
    push_field(&mut block, "", "language", metadata.language.as_deref());

    if let Some(og) = metadata.open_graph.as_ref() {
        block.push_str("openGraph:\n");
        push_field(&mut block, "  ", "title", og.title.as_deref());
        push_field(&mut block, "  ", "type", og.kind.as_deref());
        push_field(&mut block, "  ", "image", og.image.as_deref());
        push_field(&mut block, "  ", "url", og.url.as_deref());
        push_field(&mut block, "  ", "description", og.description.as_deref());
        push_field(&mut block, "  ", "siteName", og.site_name.as_deref());
        push_field(&mut block, "  ", "locale", og.locale.as_deref());
    }

    block.push_str("---\n\n");
    block.push_str(&result.content);
    block
}

fn push_field(out: &mut String, indent: &str, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(indent);
        out.push_str(key);
        out.push_str(": \"");
        out.push_str(value);
        out.push_str("\"\n");
    }
}

/// Write to the given path, or to stdout when no path was requested.
pub fn write_output(content: &str, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)?;
            log::info!("content written to {}", path.display());
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.write_all(b"\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesift_engine::{MetadataRecord, OpenGraphRecord};
    use pretty_assertions::assert_eq;

    fn result_with(metadata: Option<MetadataRecord>) -> ExtractionResult {
        ExtractionResult {
            content: "Body text".to_string(),
            title: Some("Resolved Title".to_string()),
            metadata,
        }
    }

    #[test]
    fn front_matter_lists_only_present_fields() {
        let metadata = MetadataRecord {
            description: Some("A page".to_string()),
            language: Some("en".to_string()),
            ..MetadataRecord::default()
        };

        let text = with_front_matter(&result_with(Some(metadata)));
        assert_eq!(
            text,
            "---\n\
             title: \"Resolved Title\"\n\
             description: \"A page\"\n\
             language: \"en\"\n\
             ---\n\n\
             Body text"
        );
    }

    #[test]
    fn front_matter_nests_open_graph_block() {
        let metadata = MetadataRecord {
            open_graph: Some(OpenGraphRecord {
                title: Some("OG Title".to_string()),
                kind: Some("article".to_string()),
                ..OpenGraphRecord::default()
            }),
            ..MetadataRecord::default()
        };

        let text = with_front_matter(&result_with(Some(metadata)));
        assert!(text.contains("openGraph:\n  title: \"OG Title\"\n  type: \"article\"\n"));
    }

    #[test]
    fn missing_metadata_returns_plain_body() {
        let text = with_front_matter(&result_with(None));
        assert_eq!(text, "Body text");
    }
}
