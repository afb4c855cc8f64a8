//! Output rendering for document trees.
//!
//! The core is [`render`]: a pure, post-order walk that maps every
//! [`DocumentNode`](crate::model::DocumentNode) through the rule for its kind
//! into a presentation tree of [`OutputNode`]s. That tree serializes to HTML.
//! Plain text, Markdown, and JSON renderers work on the document tree directly.
//!
//! # Example
//!
//! ```
//! use richpost::model::{DocumentNode, RichText};
//! use richpost::render::*;
//!
//! let doc = RichText::new(vec![DocumentNode::paragraph(vec![
//!     DocumentNode::text("Hello "),
//!     DocumentNode::link("https://x.io", vec![DocumentNode::text("world")]),
//! ])]);
//!
//! // Presentation tree
//! let tree = render_document(&doc, &RenderOptions::default());
//! assert_eq!(tree.len(), 1);
//!
//! // HTML without class names
//! let html = render_html(&doc, &RenderOptions::new().with_classes(false));
//! assert!(html.starts_with("<p>Hello <a href=\"https://x.io\""));
//!
//! // Plain text and Markdown
//! assert_eq!(to_text(&doc), "Hello world");
//! assert_eq!(to_markdown(&doc), "Hello [world](https://x.io)");
//! ```

mod html;
mod json;
mod markdown;
mod options;
mod output;
mod renderer;
mod style_mapping;
mod text;

pub use html::{fragment_to_html, render_html, to_html, try_render_html};
pub use json::{to_json, to_json_default, JsonFormat};
pub use markdown::to_markdown;
pub use options::{
    RenderOptions, UnknownKindPolicy, DEFAULT_ALT_TEXT, DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH,
    DEFAULT_VIDEO_TYPE, VIDEO_FALLBACK_TEXT,
};
pub use output::{Attribute, Element, OutputNode, OutputTree, Tag};
pub use renderer::{
    check_document, first_leaf_with_children, first_unknown_kind, render, render_document,
    render_with, try_render, try_render_document,
};
pub use style_mapping::{StyleMapping, StyleSlot};
pub use text::to_text;
