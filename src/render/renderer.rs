//! Document renderer.
//!
//! A post-order walk over a [`DocumentNode`] tree. Each node's children are
//! rendered first and then handed, in order, to the rule for the node's kind,
//! which wraps or lays them out. Rules are pure: the output depends only on
//! the node, its rendered children, and the [`RenderOptions`].

use crate::error::{Error, Result};
use crate::model::{DocumentNode, ImageAttrs, LinkAttrs, Marks, NodeKind, RichText, VideoAttrs};

use super::options::{
    RenderOptions, UnknownKindPolicy, DEFAULT_ALT_TEXT, DEFAULT_VIDEO_TYPE, VIDEO_FALLBACK_TEXT,
};
use super::output::{Element, OutputNode, OutputTree, Tag};
use super::style_mapping::StyleSlot;

/// Render a document tree with default options.
pub fn render(root: &DocumentNode) -> OutputTree {
    render_with(root, &RenderOptions::default())
}

/// Render a document tree.
///
/// Total over every node kind: unrecognized kinds always pass their children
/// through a neutral container, regardless of
/// [`RenderOptions::unknown_kinds`], and leaf kinds ignore any children.
/// Use [`try_render`] to reject both.
pub fn render_with(root: &DocumentNode, options: &RenderOptions) -> OutputTree {
    render_node(root, options, false)
}

/// `inline` is true when the parent only admits phrasing content.
fn render_node(node: &DocumentNode, options: &RenderOptions, inline: bool) -> OutputNode {
    let children_inline = match &node.kind {
        NodeKind::Unknown(_) => inline,
        kind => holds_phrasing(kind),
    };
    let children = node
        .children
        .iter()
        .map(|child| render_node(child, options, children_inline))
        .collect();
    apply_rule(&node.kind, children, options, inline)
}

/// Kinds whose element only admits phrasing content.
fn holds_phrasing(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Paragraph
            | NodeKind::Heading(_)
            | NodeKind::Link(_)
            | NodeKind::Bold
            | NodeKind::Italic
            | NodeKind::Underline
            | NodeKind::Code
            | NodeKind::CodeBlock
    )
}

/// Render a document tree, honoring the unknown-kind policy.
///
/// Fails with [`Error::InvalidInput`] when a text, image or video leaf
/// carries children, since the renderer would drop them.
pub fn try_render(root: &DocumentNode, options: &RenderOptions) -> Result<OutputTree> {
    check_node(root, options)?;
    Ok(render_with(root, options))
}

/// Check a document against the rules [`try_render_document`] enforces,
/// without rendering it.
pub fn check_document(doc: &RichText, options: &RenderOptions) -> Result<()> {
    doc.children
        .iter()
        .try_for_each(|block| check_node(block, options))
}

fn check_node(root: &DocumentNode, options: &RenderOptions) -> Result<()> {
    if let Some(name) = first_leaf_with_children(root) {
        return Err(Error::InvalidInput(format!(
            "{} node cannot have content children",
            name
        )));
    }
    if options.unknown_kinds == UnknownKindPolicy::Reject {
        if let Some(name) = first_unknown_kind(root) {
            return Err(Error::UnsupportedKind(name.to_string()));
        }
    }
    Ok(())
}

/// Render every top-level block of a document.
pub fn render_document(doc: &RichText, options: &RenderOptions) -> Vec<OutputNode> {
    doc.children
        .iter()
        .map(|block| render_with(block, options))
        .collect()
}

/// Render every top-level block of a document, honoring the unknown-kind policy.
pub fn try_render_document(doc: &RichText, options: &RenderOptions) -> Result<Vec<OutputNode>> {
    doc.children
        .iter()
        .map(|block| try_render(block, options))
        .collect()
}

/// Name of the first unrecognized kind in document order.
pub fn first_unknown_kind(node: &DocumentNode) -> Option<&str> {
    if let NodeKind::Unknown(name) = &node.kind {
        return Some(name.as_str());
    }
    node.children.iter().find_map(first_unknown_kind)
}

/// Name of the first leaf kind in document order that has children.
pub fn first_leaf_with_children(node: &DocumentNode) -> Option<&str> {
    let leaf = matches!(
        node.kind,
        NodeKind::Text(_) | NodeKind::Image(_) | NodeKind::Video(_)
    );
    if leaf && !node.children.is_empty() {
        return Some(node.kind.name());
    }
    node.children.iter().find_map(first_leaf_with_children)
}

/// One rule per kind.
fn apply_rule(
    kind: &NodeKind,
    children: Vec<OutputNode>,
    options: &RenderOptions,
    inline: bool,
) -> OutputNode {
    match kind {
        NodeKind::Text(leaf) => render_text(&leaf.text, leaf.marks, options),
        NodeKind::Link(attrs) => render_link(attrs, children, options),
        NodeKind::Image(attrs) => render_image(attrs, options),
        NodeKind::Video(attrs) => render_video(attrs, options),
        NodeKind::Heading(level) => {
            let level = level.level();
            wrap(Tag::heading(level), StyleSlot::Heading(level), children, options)
        }
        NodeKind::Paragraph => wrap(Tag::P, StyleSlot::Paragraph, children, options),
        NodeKind::Blockquote => wrap(Tag::Blockquote, StyleSlot::Blockquote, children, options),
        NodeKind::BulletedList => wrap(Tag::Ul, StyleSlot::BulletedList, children, options),
        NodeKind::NumberedList => wrap(Tag::Ol, StyleSlot::NumberedList, children, options),
        NodeKind::ListItem => wrap(Tag::Li, StyleSlot::ListItem, children, options),
        NodeKind::Table => wrap(Tag::Table, StyleSlot::Table, children, options),
        NodeKind::TableHead => wrap(Tag::Thead, StyleSlot::TableHead, children, options),
        NodeKind::TableBody => wrap(Tag::Tbody, StyleSlot::TableBody, children, options),
        NodeKind::TableRow => wrap(Tag::Tr, StyleSlot::TableRow, children, options),
        NodeKind::TableHeaderCell => {
            wrap(Tag::Th, StyleSlot::TableHeaderCell, children, options)
        }
        NodeKind::TableCell => wrap(Tag::Td, StyleSlot::TableCell, children, options),
        NodeKind::Bold => wrap(Tag::Strong, StyleSlot::Bold, children, options),
        NodeKind::Italic => wrap(Tag::Em, StyleSlot::Italic, children, options),
        NodeKind::Underline => wrap(Tag::U, StyleSlot::Underline, children, options),
        NodeKind::Code => wrap(Tag::Code, StyleSlot::Code, children, options),
        NodeKind::CodeBlock => {
            let inner = wrap(Tag::Code, StyleSlot::CodeBlockInner, children, options);
            wrap(Tag::Pre, StyleSlot::CodeBlock, vec![inner], options)
        }
        NodeKind::Unknown(_) => {
            let tag = if inline { Tag::Span } else { Tag::Div };
            Element::new(tag).with_children(children).into()
        }
    }
}

fn wrap(
    tag: Tag,
    slot: StyleSlot,
    children: Vec<OutputNode>,
    options: &RenderOptions,
) -> OutputNode {
    Element::new(tag)
        .with_class(options.class(slot))
        .with_children(children)
        .into()
}

/// Marks nest outermost-first: bold, italic, underline, code.
fn render_text(text: &str, marks: Marks, options: &RenderOptions) -> OutputNode {
    let mut node = OutputNode::text(text);
    if marks.code {
        node = wrap(Tag::Code, StyleSlot::Code, vec![node], options);
    }
    if marks.underline {
        node = wrap(Tag::U, StyleSlot::Underline, vec![node], options);
    }
    if marks.italic {
        node = wrap(Tag::Em, StyleSlot::Italic, vec![node], options);
    }
    if marks.bold {
        node = wrap(Tag::Strong, StyleSlot::Bold, vec![node], options);
    }
    node
}

fn render_link(attrs: &LinkAttrs, children: Vec<OutputNode>, options: &RenderOptions) -> OutputNode {
    Element::new(Tag::A)
        .with_attr("href", attrs.href.as_str())
        .with_attr("target", "_blank")
        .with_attr("rel", "noopener noreferrer")
        .with_opt_attr("title", attrs.title.as_deref())
        .with_class(options.class(StyleSlot::Link))
        .with_children(children)
        .into()
}

fn render_image(attrs: &ImageAttrs, options: &RenderOptions) -> OutputNode {
    let alt = attrs.alt_text.as_deref().unwrap_or(DEFAULT_ALT_TEXT);

    let img = Element::new(Tag::Img)
        .with_attr("src", attrs.src.as_str())
        .with_attr("alt", alt)
        .with_opt_attr("title", attrs.title.as_deref())
        .with_attr("width", options.image_width.to_string())
        .with_attr("height", options.image_height.to_string())
        .with_class(options.class(StyleSlot::Image));

    let mut figure = Element::new(Tag::Figure).with_class(options.class(StyleSlot::Figure));
    figure.push(img.into());
    if let Some(title) = &attrs.title {
        let caption = Element::new(Tag::Figcaption)
            .with_class(options.class(StyleSlot::Caption))
            .with_children(vec![OutputNode::text(title.as_str())]);
        figure.push(caption.into());
    }
    figure.into()
}

fn render_video(attrs: &VideoAttrs, options: &RenderOptions) -> OutputNode {
    let source = Element::new(Tag::Source)
        .with_attr("src", attrs.src.as_str())
        .with_attr(
            "type",
            attrs.mime_type.as_deref().unwrap_or(DEFAULT_VIDEO_TYPE),
        );

    let mut video = Element::new(Tag::Video)
        .with_flag("controls")
        .with_class(options.class(StyleSlot::Video));
    video.push(source.into());
    if let Some(title) = &attrs.title {
        let track = Element::new(Tag::Track)
            .with_attr("kind", "captions")
            .with_attr("label", title.as_str());
        video.push(track.into());
    }
    video.push(OutputNode::text(VIDEO_FALLBACK_TEXT));

    Element::new(Tag::Div)
        .with_class(options.class(StyleSlot::VideoFrame))
        .with_children(vec![video.into()])
        .into()
}
