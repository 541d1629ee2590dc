use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Decode a fetched body into UTF-8 text.
///
/// Encoding is picked in order: BOM sniff, `charset=` from the Content-Type
/// header, chardetng detection. Malformed sequences become replacement
/// characters so the document provider's contract stays "HTML text or
/// transport error". Returns the text and the name of the encoding used.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> (String, &'static str) {
    let encoding = sniff_encoding(bytes, content_type);
    let (text, actual, _) = encoding.decode(bytes);
    (text.into_owned(), actual.name())
}

fn sniff_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if let Some(label) = content_type.and_then(charset_label) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return encoding;
        }
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn charset_label(content_type: &str) -> Option<&str> {
    content_type
        .split(';')
        .find_map(|part| {
            let (key, value) = part.trim().split_once('=')?;
            if key.eq_ignore_ascii_case("charset") {
                Some(value.trim_matches(|c| c == '"' || c == '\'' || c == ' '))
            } else {
                None
            }
        })
        .filter(|label| !label.is_empty())
}
