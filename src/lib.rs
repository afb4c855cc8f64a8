//! # richpost
//!
//! Rich-text blog content: parse the document trees a managed content API
//! serves, render them to HTML, plain text, or Markdown, and read or publish
//! posts through a content source.
//!
//! ## Quick Start
//!
//! ```no_run
//! use richpost::{parse_file, to_html};
//!
//! // Render a stored document body to HTML
//! let html = to_html("post-body.json")?;
//! std::fs::write("post.html", html)?;
//!
//! // Access the tree itself
//! let doc = parse_file("post-body.json")?;
//! println!("Blocks: {}", doc.children.len());
//! # Ok::<(), richpost::Error>(())
//! ```
//!
//! ## Content Sources
//!
//! ```no_run
//! use richpost::source::{ContentSource, InMemorySource, PageRequest, PostDraft};
//!
//! let source = InMemorySource::from_path("posts.json")?;
//! let draft = PostDraft::new("Hello World", "Sam", "A first post", "Welcome!")?;
//! source.create_and_publish(&draft)?;
//!
//! let page = source.fetch_posts(PageRequest::default())?;
//! println!("Page 1 of {}", page.total_pages());
//! # Ok::<(), richpost::Error>(())
//! ```
//!
//! ## Features
//!
//! - `http` (default): GraphQL content source over HTTP
//! - `async`: Async wrapper for content sources using Tokio

pub mod error;
pub mod model;
pub mod render;
pub mod source;

// Re-exports
pub use error::{Error, Result};
pub use model::{
    parse_document, DocumentNode, HeadingLevel, ImageAttrs, LinkAttrs, Marks, NodeKind, RichText,
    TextLeaf, VideoAttrs,
};
pub use render::{OutputNode, OutputTree, RenderOptions};

use std::fs;
use std::path::Path;

/// Parse a JSON document file into a [`RichText`].
///
/// The file may hold a document root (`{"children": [...]}`), a list of
/// nodes, or a single node.
///
/// # Example
///
/// ```no_run
/// use richpost::parse_file;
///
/// let doc = parse_file("post-body.json")?;
/// println!("Blocks: {}", doc.children.len());
/// # Ok::<(), richpost::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<RichText> {
    let json = fs::read_to_string(path)?;
    parse_document(&json)
}

/// Render a JSON document file to HTML with the default class names.
///
/// # Example
///
/// ```no_run
/// use richpost::to_html;
///
/// let html = to_html("post-body.json")?;
/// # Ok::<(), richpost::Error>(())
/// ```
pub fn to_html(path: impl AsRef<Path>) -> Result<String> {
    to_html_with_options(path, &RenderOptions::default())
}

/// Render a JSON document file to HTML with options.
///
/// # Example
///
/// ```no_run
/// use richpost::{to_html_with_options, RenderOptions};
///
/// let options = RenderOptions::new().with_classes(false).strict();
/// let html = to_html_with_options("post-body.json", &options)?;
/// # Ok::<(), richpost::Error>(())
/// ```
pub fn to_html_with_options(path: impl AsRef<Path>, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::try_render_html(&doc, options)
}

/// Extract plain text from a JSON document file.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_text(&doc))
}

/// Convert a JSON document file to Markdown.
pub fn to_markdown(path: impl AsRef<Path>) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_markdown(&doc))
}
