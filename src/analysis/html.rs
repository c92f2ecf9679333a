use chardetng::EncodingDetector;
use scraper::{Html, Selector};

const EXCLUDED_TAGS: [&str; 5] = ["html", "style", "script", "head", "meta"];

/// §4.2 steps 1-2: decode with automatic charset detection, then, if the
/// decoded text looks like HTML, keep only the visible text nodes whose
/// nearest enclosing element is not one of the excluded tags and is not
/// the synthetic document root. Plaintext payloads pass through decoded
/// as-is.
pub fn decode_and_extract_text(raw_bytes: &[u8]) -> String {
    let decoded = decode_bytes(raw_bytes);

    if looks_like_html(&decoded) {
        extract_visible_text(&decoded)
    } else {
        decoded
    }
}

fn decode_bytes(raw_bytes: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(raw_bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _, _) = encoding.decode(raw_bytes);
    text.into_owned()
}

fn looks_like_html(text: &str) -> bool {
    let head: String = text.chars().take(512).collect::<String>().to_lowercase();
    head.contains("<html") || head.contains("<!doctype html") || head.contains("<body")
}

fn extract_visible_text(text: &str) -> String {
    let document = Html::parse_document(text);
    let root_selector = Selector::parse(":root").expect("static selector");

    let mut pieces = Vec::new();
    for root in document.select(&root_selector) {
        collect_visible_text(&root, &mut pieces);
    }

    pieces.join(" ")
}

fn collect_visible_text(element: &scraper::ElementRef, out: &mut Vec<String>) {
    let tag = element.value().name();
    if EXCLUDED_TAGS.contains(&tag) {
        return;
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        } else if let Some(child_element) = scraper::ElementRef::wrap(child) {
            collect_visible_text(&child_element, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_visible_text_excluding_script_and_style() {
        let html = r#"<html><head><title>t</title></head><body><script>var x=1;</script><p>Olá mundo</p><style>.a{}</style></body></html>"#;
        let text = decode_and_extract_text(html.as_bytes());
        assert!(text.contains("Olá mundo"));
        assert!(!text.contains("var x"));
    }

    #[test]
    fn plaintext_passes_through_undecorated() {
        let text = decode_and_extract_text("casa jardim".as_bytes());
        assert_eq!(text, "casa jardim");
    }
}
