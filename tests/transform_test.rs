//! End-to-end document rewriting tests.

use faleproxy::dom::{ArenaDom, NodeData, parse_html};
use faleproxy::{BrandRules, Rewriter, transform_document};
use proptest::prelude::*;

const SAMPLE: &str = include_str!("fixtures/yale.html");

/// Element names with their attributes, in document order.
fn structure(dom: &ArenaDom) -> Vec<(String, Vec<(String, String)>)> {
    dom.descendants()
        .filter_map(|id| match &dom.get(id)?.data {
            NodeData::Element { name, attrs } => Some((
                name.local.to_string(),
                attrs
                    .iter()
                    .map(|a| (a.name.local.to_string(), a.value.clone()))
                    .collect(),
            )),
            _ => None,
        })
        .collect()
}

fn body_text(html: &str) -> String {
    let dom = parse_html(html);
    let body = dom.find_by_tag("body").expect("parser always creates body");
    dom.text_of(body)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_title_phrase() {
    let out = transform_document("<title>Yale University Test Page</title>");
    assert!(out.contains("<title>Fale University Test Page</title>"), "{out}");
}

#[test]
fn test_no_phrase_unchanged() {
    let html = "<p>This is a test page with no Yale references.</p>";
    let out = transform_document(html);
    assert!(out.contains(html), "{out}");
}

#[test]
fn test_anchor_label_and_href() {
    let out = transform_document(r#"<a href="https://www.yale.edu/about">About Yale</a>"#);
    assert!(
        out.contains(r#"<a href="https://www.yale.edu/about">About Fale</a>"#),
        "{out}"
    );
}

#[test]
fn test_casing_variants_in_one_node() {
    let out = transform_document(
        "<p>YALE University, Yale College, and yale medical school are all part of the same institution.</p>",
    );
    assert!(
        out.contains("<p>FALE University, Fale College, and fale medical school are all part of the same institution.</p>"),
        "{out}"
    );
}

#[test]
fn test_sample_page() {
    let out = transform_document(SAMPLE);

    // Brand phrases
    assert!(out.contains("<title>Fale University Test Page</title>"));
    assert!(out.contains("<h1>Welcome to Fale University</h1>"));
    assert!(out.contains("Fale University is a private Ivy League"));
    assert!(out.contains(
        "FALE University, Fale College, and fale medical school are all part of the same institution."
    ));

    // Bare mentions stay
    assert!(out.contains("Yale was founded in 1701"));

    // Links: href untouched, only exact labels or phrases rewritten
    assert!(out.contains(r#"<a href="https://www.yale.edu/about">About Fale</a>"#));
    assert!(out.contains(r#"<a href="https://www.yale.edu/admissions">Yale Admissions</a>"#));
    assert!(out.contains(r#"<a href="https://medicine.yale.edu/">Fale medical school</a>"#));

    // Attributes, comments, style and script are immune
    assert!(out.contains(r#"alt="Yale Logo""#));
    assert!(out.contains("<!-- Yale University footer -->"));
    assert!(out.contains("/* Yale University brand colour */"));
    assert!(out.contains(r#"console.log("Yale University analytics");"#));
}

#[test]
fn test_sample_page_structure_preserved() {
    let out = transform_document(SAMPLE);
    assert_eq!(structure(&parse_html(SAMPLE)), structure(&parse_html(&out)));
}

#[test]
fn test_sample_page_idempotent() {
    let once = transform_document(SAMPLE);
    assert_eq!(transform_document(&once), once);
}

#[test]
fn test_similar_anchor_labels_unchanged() {
    let html = r#"<a href="/a">About Yale Today</a><a href="/b">ABOUT Yale</a>"#;
    let out = transform_document(html);
    assert!(out.contains(html), "{out}");
}

#[test]
fn test_anchor_label_with_whitespace() {
    let out = transform_document("<a href=\"/about\">\n    About Yale\n  </a>");
    assert!(out.contains("<a href=\"/about\">\n    About Fale\n  </a>"), "{out}");
}

#[test]
fn test_phrase_split_across_elements_unchanged() {
    let html = "<p>Yale <b>University</b></p>";
    let out = transform_document(html);
    assert!(out.contains(html), "{out}");
}

#[test]
fn test_svg_script_is_excluded() {
    let html = "<svg><script>var s = 'Yale University';</script><text>Yale College</text></svg>";
    let out = transform_document(html);
    assert!(out.contains("var s = 'Yale University';"), "{out}");
    assert!(out.contains("<text>Fale College</text>"), "{out}");
}

#[test]
fn test_non_html_input() {
    let out = transform_document("Yale University\nplain text");
    assert!(out.contains("Fale University\nplain text"), "{out}");
}

#[test]
fn test_empty_input() {
    assert_eq!(
        transform_document(""),
        "<html><head></head><body></body></html>"
    );
}

#[test]
fn test_entities_in_text() {
    let out = transform_document("<p>Yale&nbsp;University &amp; Yale College</p>");
    assert!(
        out.contains("<p>Fale&nbsp;University &amp; Fale College</p>"),
        "{out}"
    );
}

#[test]
fn test_custom_rules_shared_across_threads() {
    let rules = BrandRules::new("Yale", "Gale").with_continuation("Law School");
    let rewriter = std::sync::Arc::new(Rewriter::new(rules).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rewriter = std::sync::Arc::clone(&rewriter);
            std::thread::spawn(move || {
                rewriter.transform_document(&format!("<p>{i}: Yale Law School</p>"))
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap();
        assert!(out.contains(&format!("<p>{i}: Gale Law School</p>")), "{out}");
    }
}

// ============================================================================
// Properties
// ============================================================================

fn phrase_text() -> impl Strategy<Value = String> {
    let words = prop::sample::select(vec![
        "Yale", "YALE", "yale", "YaLe", "University", "College", "medical", "school",
        "About", "the", "Yalie", "New", ",", ".",
    ]);
    let gaps = prop::sample::select(vec![" ", "  ", "\n", "\t ", ""]);
    prop::collection::vec((words, gaps), 0..24).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(word, gap)| format!("{word}{gap}"))
            .collect()
    })
}

fn document(text: &str, label: &str) -> String {
    format!(
        r#"<div title="{text}"><p>{text}</p><a href="https://yale.edu/{label}">{label}</a><script>{text}</script></div>"#,
    )
}

proptest! {
    #[test]
    fn prop_idempotent(text in phrase_text(), label in phrase_text()) {
        let html = document(&text, &label);
        let once = transform_document(&html);
        prop_assert_eq!(transform_document(&once), once);
    }

    #[test]
    fn prop_structure_preserved(text in phrase_text(), label in phrase_text()) {
        let html = document(&text, &label);
        let out = transform_document(&html);
        prop_assert_eq!(structure(&parse_html(&html)), structure(&parse_html(&out)));
    }

    #[test]
    fn prop_only_target_tokens_change(text in phrase_text(), label in phrase_text()) {
        let html = document(&text, &label);
        let out = transform_document(&html);
        let before = body_text(&html).to_lowercase();
        let after = body_text(&out).to_lowercase().replace("fale", "yale");
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_no_continuation_no_change(text in "[A-Za-z ,.]{0,60}") {
        prop_assume!(!text.contains("University") && !text.contains("College") && !text.contains("medical"));
        let html = format!("<p>{text}</p>");
        let out = transform_document(&html);
        prop_assert_eq!(body_text(&out), body_text(&html));
    }
}
