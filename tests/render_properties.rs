//! Behavioral properties of the document renderer, driven from wire-format JSON.
//!
//! Run with: cargo test --test render_properties

use richpost::model::{node_from_value, parse_document, DocumentNode, NodeKind};
use richpost::render::{
    render, render_document, render_html, render_with, try_render, OutputNode, RenderOptions, Tag,
};
use richpost::Error;
use serde_json::json;

fn node(value: serde_json::Value) -> DocumentNode {
    node_from_value(value).unwrap()
}

fn plain() -> RenderOptions {
    RenderOptions::new().with_classes(false)
}

/// A document touching every known kind.
fn kitchen_sink() -> serde_json::Value {
    json!({"children": [
        {"type": "heading-one", "children": [{"text": "Title"}]},
        {"type": "heading", "level": 4, "children": [{"text": "Sub"}]},
        {"type": "paragraph", "children": [
            {"text": "plain "},
            {"text": "bold", "bold": true},
            {"text": "all", "bold": true, "italic": true, "underline": true, "code": true},
            {"type": "link", "href": "https://x.io", "title": "X", "children": [{"text": "x"}]},
            {"type": "bold", "children": [{"text": "b"}, {"type": "italic", "children": [{"text": "i"}]}]},
            {"type": "underline", "children": [{"text": "u"}]},
            {"type": "code", "children": [{"text": "c"}]}
        ]},
        {"type": "block-quote", "children": [{"text": "quoted"}]},
        {"type": "bulleted-list", "children": [
            {"type": "list-item", "children": [{"text": "one"}]},
            {"type": "list-item", "children": [
                {"text": "two"},
                {"type": "numbered-list", "children": [
                    {"type": "list-item", "children": [{"text": "nested"}]}
                ]}
            ]}
        ]},
        {"type": "table", "children": [
            {"type": "table_head", "children": [{"type": "table_row", "children": [
                {"type": "table_header_cell", "children": [{"text": "H1"}]},
                {"type": "table_header_cell", "children": [{"text": "H2"}]}
            ]}]},
            {"type": "table-body", "children": [{"type": "table-row", "children": [
                {"type": "table-cell", "children": [{"text": "a"}]},
                {"type": "table-cell", "children": [{"text": "b"}]}
            ]}]}
        ]},
        {"type": "image", "src": "https://cdn/x.png", "title": "A cat", "children": [{"text": ""}]},
        {"type": "video", "src": "https://cdn/x.mp4", "children": [{"text": ""}]},
        {"type": "code-block", "children": [{"text": "let x = 1;"}]},
        {"type": "footnote", "children": [{"text": "f1"}, {"text": "f2"}]}
    ]})
}

/// Output children that correspond one-to-one with the input's children.
fn content_slot(node: &DocumentNode, out: &OutputNode) -> Vec<OutputNode> {
    match node.kind {
        NodeKind::CodeBlock => out.children()[0].children().to_vec(),
        _ => out.children().to_vec(),
    }
}

fn assert_isomorphic(node: &DocumentNode, out: &OutputNode) {
    match node.kind {
        NodeKind::Text(_) | NodeKind::Image(_) | NodeKind::Video(_) => return,
        _ => {}
    }
    let slot = content_slot(node, out);
    assert_eq!(
        slot.len(),
        node.children.len(),
        "child count differs for {}",
        node.kind.name()
    );
    for (child, rendered) in node.children.iter().zip(&slot) {
        assert_isomorphic(child, rendered);
    }
}

#[test]
fn test_structural_isomorphism() {
    let doc = richpost::model::document_from_value(kitchen_sink()).unwrap();
    let out = render_document(&doc, &RenderOptions::default());
    assert_eq!(out.len(), doc.children.len());
    for (block, rendered) in doc.children.iter().zip(&out) {
        assert_isomorphic(block, rendered);
    }
}

#[test]
fn test_rendering_is_deterministic() {
    let doc = richpost::model::document_from_value(kitchen_sink()).unwrap();
    let options = RenderOptions::default();
    assert_eq!(render_document(&doc, &options), render_document(&doc, &options));
    assert_eq!(render_html(&doc, &options), render_html(&doc, &options));
}

#[test]
fn test_rendering_does_not_mutate_input() {
    let doc = richpost::model::document_from_value(kitchen_sink()).unwrap();
    let before = doc.clone();
    let _ = render_html(&doc, &RenderOptions::default());
    assert_eq!(doc, before);
}

#[test]
fn test_image_alt_defaults_to_image() {
    let out = render(&node(json!({"type": "image", "src": "https://cdn/a.png"})));
    let img = out.as_element().unwrap().find(Tag::Img).unwrap();
    assert_eq!(img.attr("alt"), Some("Image"));
    assert_eq!(img.attr("width"), Some("700"));
    assert_eq!(img.attr("height"), Some("475"));

    let out = render(&node(json!({"type": "image", "src": "https://cdn/a.png", "altText": "cat"})));
    let img = out.as_element().unwrap().find(Tag::Img).unwrap();
    assert_eq!(img.attr("alt"), Some("cat"));
}

#[test]
fn test_caption_only_with_title() {
    let with_title = render(&node(json!({"type": "image", "src": "s", "title": "A cat"})));
    let caption = with_title.as_element().unwrap().find(Tag::Figcaption).unwrap();
    assert_eq!(OutputNode::from(caption.clone()).text_content(), "A cat");

    let without = render(&node(json!({"type": "image", "src": "s"})));
    assert!(without.as_element().unwrap().find(Tag::Figcaption).is_none());

    let video = render(&node(json!({"type": "video", "src": "v", "title": "Demo"})));
    let track = video.as_element().unwrap().find(Tag::Track).unwrap();
    assert_eq!(track.attr("label"), Some("Demo"));
    assert_eq!(track.attr("kind"), Some("captions"));

    let video = render(&node(json!({"type": "video", "src": "v"})));
    assert!(video.as_element().unwrap().find(Tag::Track).is_none());
}

#[test]
fn test_video_has_controls_source_and_fallback() {
    let out = render(&node(json!({"type": "video", "src": "https://cdn/v.webm", "mimeType": "video/webm"})));
    let video = out.as_element().unwrap().find(Tag::Video).unwrap();
    assert!(video.has_attr("controls"));
    let source = video.find(Tag::Source).unwrap();
    assert_eq!(source.attr("src"), Some("https://cdn/v.webm"));
    assert_eq!(source.attr("type"), Some("video/webm"));
    assert!(!OutputNode::from(video.clone()).text_content().is_empty());

    let out = render(&node(json!({"type": "video", "src": "v"})));
    let source = out.as_element().unwrap().find(Tag::Source).unwrap();
    assert_eq!(source.attr("type"), Some("video/mp4"));
}

#[test]
fn test_marks_compose_into_nested_emphasis() {
    let out = render_with(
        &node(json!({"text": "both", "bold": true, "italic": true})),
        &plain(),
    );
    assert_eq!(out.tag(), Some(Tag::Strong));
    assert_eq!(out.children()[0].tag(), Some(Tag::Em));
    assert_eq!(out.text_content(), "both");

    let doc = parse_document(r#"[{"text": "x", "bold": true, "italic": true, "underline": true, "code": true}]"#)
        .unwrap();
    assert_eq!(
        render_html(&doc, &plain()),
        "<strong><em><u><code>x</code></u></em></strong>"
    );
}

#[test]
fn test_unknown_kind_passes_children_through() {
    let footnote = node(json!({"type": "footnote", "children": [{"text": "first"}, {"text": "second"}]}));
    let out = render(&footnote);
    let div = out.as_element().unwrap();
    assert_eq!(div.tag, Tag::Div);
    assert_eq!(
        div.children,
        vec![OutputNode::text("first"), OutputNode::text("second")]
    );

    let err = try_render(&footnote, &RenderOptions::new().strict()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedKind(ref k) if k == "footnote"));
    assert!(try_render(&footnote, &RenderOptions::new()).is_ok());
}

#[test]
fn test_unknown_inline_kind_stays_phrasing() {
    let doc = parse_document(
        r#"[{"type": "paragraph", "children": [
            {"text": "Hi "},
            {"type": "mention", "children": [{"text": "@sam"}]},
            {"text": " there"}
        ]}]"#,
    )
    .unwrap();
    assert_eq!(
        render_html(&doc, &plain()),
        "<p>Hi <span>@sam</span> there</p>"
    );
}

#[test]
fn test_leaf_children_are_rejected_by_checked_render() {
    let mut image = node(json!({"type": "image", "src": "a.png"}));
    image.children.push(node(json!({"text": "caption text"})));
    let err = try_render(&image, &RenderOptions::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_end_to_end_paragraph_with_link() {
    let doc = parse_document(
        r#"{"children": [{"type": "paragraph", "children": [
            {"text": "Hello "},
            {"type": "link", "href": "https://x.io", "children": [{"text": "world"}]}
        ]}]}"#,
    )
    .unwrap();

    let out = render_document(&doc, &plain());
    let p = out[0].as_element().unwrap();
    assert_eq!(p.tag, Tag::P);
    assert_eq!(p.children[0], OutputNode::text("Hello "));
    let a = p.children[1].as_element().unwrap();
    assert_eq!(a.tag, Tag::A);
    assert_eq!(a.attr("href"), Some("https://x.io"));
    assert_eq!(a.attr("target"), Some("_blank"));
    assert_eq!(a.children, vec![OutputNode::text("world")]);

    assert_eq!(
        render_html(&doc, &plain()),
        "<p>Hello <a href=\"https://x.io\" target=\"_blank\" rel=\"noopener noreferrer\">world</a></p>"
    );
}

#[test]
fn test_html_escapes_text_and_attributes() {
    let doc = parse_document(
        r#"[{"type": "paragraph", "children": [
            {"text": "<script>alert('x') & more</script>"},
            {"type": "link", "href": "https://x.io/?a=1&b=\"2\"", "children": [{"text": "q"}]}
        ]}]"#,
    )
    .unwrap();
    let html = render_html(&doc, &plain());
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&amp; more"));
    assert!(html.contains("a=1&amp;b=&quot;2&quot;"));
}

#[test]
fn test_default_classes_are_applied() {
    let doc = parse_document(r#"[{"type": "heading-one", "children": [{"text": "T"}]}]"#).unwrap();
    let html = render_html(&doc, &RenderOptions::default());
    assert!(html.starts_with("<h1 class=\""));
    assert!(!render_html(&doc, &plain()).contains("class="));
}

#[test]
fn test_invalid_input_is_rejected_at_parse() {
    for bad in [
        r#"[{"type": "link", "children": []}]"#,
        r#"[{"type": "image"}]"#,
        r#"[{"type": "heading", "level": 9, "children": []}]"#,
        r#"[{"type": "paragraph", "children": "nope"}]"#,
        r#"[{"bold": true}]"#,
        r#"[42]"#,
    ] {
        let err = parse_document(bad).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "accepted {}", bad);
    }
}
