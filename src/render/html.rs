//! HTML serializer for the presentation tree.

use quick_xml::escape::escape;

use crate::error::Result;
use crate::model::RichText;

use super::options::RenderOptions;
use super::output::{Element, OutputNode};
use super::renderer::{render_document, try_render_document};

/// Serialize a presentation node to HTML.
pub fn to_html(node: &OutputNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serialize a sequence of presentation nodes to HTML.
pub fn fragment_to_html(nodes: &[OutputNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

/// Render a document straight to HTML.
pub fn render_html(doc: &RichText, options: &RenderOptions) -> String {
    fragment_to_html(&render_document(doc, options))
}

/// Render a document to HTML, honoring the unknown-kind policy.
pub fn try_render_html(doc: &RichText, options: &RenderOptions) -> Result<String> {
    Ok(fragment_to_html(&try_render_document(doc, options)?))
}

fn write_node(node: &OutputNode, out: &mut String) {
    match node {
        OutputNode::Text(text) => out.push_str(&escape(text.as_str())),
        OutputNode::Element(el) => write_element(el, out),
    }
}

fn write_element(el: &Element, out: &mut String) {
    let name = el.tag.name();
    out.push('<');
    out.push_str(name);
    for attr in &el.attributes {
        out.push(' ');
        out.push_str(attr.name);
        if let Some(value) = &attr.value {
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
    }
    out.push('>');

    if el.tag.is_void() {
        return;
    }

    for child in &el.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
