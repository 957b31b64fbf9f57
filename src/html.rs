//! HTML extraction: `extract(html) -> {body_text, important_text}`,
//! implemented with `scraper` so the pipeline is runnable end to end.

use scraper::{Html, Node, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;

fn excluded_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("script, style").expect("static selector is valid"))
}

/// The two text streams produced from one HTML document.
pub struct ExtractedText {
    pub body_text: String,
    pub important_text: String,
}

fn important_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| {
        Selector::parse("title, h1, h2, h3, b, strong").expect("static selector is valid")
    })
}

/// Extract `body_text` (all visible text, scripts/styles removed) and
/// `important_text` (concatenated text of `<title>`, `<h1..h3>`, `<b>`,
/// `<strong>`). `important_text` occurrences are NOT subtracted from
/// `body_text` — the streams overlap by design.
pub fn extract(html: &str) -> ExtractedText {
    let document = Html::parse_document(html);

    let excluded_ids: HashSet<_> = document
        .select(excluded_selector())
        .map(|el| el.id())
        .collect();

    let body_text = document
        .tree
        .nodes()
        .filter_map(|node| match node.value() {
            Node::Text(text) if !node.ancestors().any(|a| excluded_ids.contains(&a.id())) => {
                Some(text.text.as_ref())
            }
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ");

    let important_text = document
        .select(important_selector())
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(" ");

    ExtractedText {
        body_text,
        important_text,
    }
}
