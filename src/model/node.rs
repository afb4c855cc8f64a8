//! Document tree nodes.

use serde::{Deserialize, Serialize};

/// Heading level (h1-h6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Create a heading level from a number (1-6).
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            4 => Some(HeadingLevel::H4),
            5 => Some(HeadingLevel::H5),
            6 => Some(HeadingLevel::H6),
            _ => None,
        }
    }

    /// Get the numeric level (1-6).
    pub fn level(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }
}

/// Inline mark flags carried by a text leaf. Marks compose freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub code: bool,
}

impl Marks {
    /// No marks set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if any mark is set.
    pub fn is_empty(&self) -> bool {
        !(self.bold || self.italic || self.underline || self.code)
    }
}

/// A literal string with its marks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLeaf {
    pub text: String,
    pub marks: Marks,
}

/// Attributes of a hyperlink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAttrs {
    pub href: String,
    pub title: Option<String>,
    /// Editor hint from the content API. Links always open in a new
    /// browsing context when rendered; the flag is kept for round-tripping.
    pub open_in_new_tab: Option<bool>,
}

/// Attributes of an embedded image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAttrs {
    pub src: String,
    pub title: Option<String>,
    pub alt_text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mime_type: Option<String>,
}

/// Attributes of an embedded video.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoAttrs {
    pub src: String,
    pub title: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mime_type: Option<String>,
}

/// The role of a node, and the attributes that role carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Text(TextLeaf),
    Paragraph,
    Heading(HeadingLevel),
    BulletedList,
    NumberedList,
    ListItem,
    Link(LinkAttrs),
    Image(ImageAttrs),
    Video(VideoAttrs),
    Blockquote,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell,
    TableCell,
    Bold,
    Italic,
    Underline,
    Code,
    CodeBlock,
    /// A kind with no rendering rule, keyed by its wire name.
    Unknown(String),
}

impl NodeKind {
    /// Canonical name of this kind.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Text(_) => "text",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading(_) => "heading",
            NodeKind::BulletedList => "bulleted-list",
            NodeKind::NumberedList => "numbered-list",
            NodeKind::ListItem => "list-item",
            NodeKind::Link(_) => "link",
            NodeKind::Image(_) => "image",
            NodeKind::Video(_) => "video",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Table => "table",
            NodeKind::TableHead => "table-head",
            NodeKind::TableBody => "table-body",
            NodeKind::TableRow => "table-row",
            NodeKind::TableHeaderCell => "table-header-cell",
            NodeKind::TableCell => "table-cell",
            NodeKind::Bold => "bold",
            NodeKind::Italic => "italic",
            NodeKind::Underline => "underline",
            NodeKind::Code => "code",
            NodeKind::CodeBlock => "code-block",
            NodeKind::Unknown(name) => name,
        }
    }

    /// Check if this kind has a rendering rule.
    pub fn is_known(&self) -> bool {
        !matches!(self, NodeKind::Unknown(_))
    }
}

/// A node of a rich-text document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub struct DocumentNode {
    pub kind: NodeKind,
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Create a node of the given kind with children.
    pub fn new(kind: NodeKind, children: Vec<DocumentNode>) -> Self {
        Self { kind, children }
    }

    /// Create a plain text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::styled_text(text, Marks::none())
    }

    /// Create a text leaf with marks.
    pub fn styled_text(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            kind: NodeKind::Text(TextLeaf {
                text: text.into(),
                marks,
            }),
            children: Vec::new(),
        }
    }

    /// Create a paragraph.
    pub fn paragraph(children: Vec<DocumentNode>) -> Self {
        Self::new(NodeKind::Paragraph, children)
    }

    /// Create a heading.
    pub fn heading(level: HeadingLevel, children: Vec<DocumentNode>) -> Self {
        Self::new(NodeKind::Heading(level), children)
    }

    /// Create a hyperlink.
    pub fn link(href: impl Into<String>, children: Vec<DocumentNode>) -> Self {
        Self::new(
            NodeKind::Link(LinkAttrs {
                href: href.into(),
                ..Default::default()
            }),
            children,
        )
    }

    /// Create an image leaf.
    pub fn image(attrs: ImageAttrs) -> Self {
        Self::new(NodeKind::Image(attrs), Vec::new())
    }

    /// Create a video leaf.
    pub fn video(attrs: VideoAttrs) -> Self {
        Self::new(NodeKind::Video(attrs), Vec::new())
    }

    /// Check if this node is a text leaf.
    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Get the concatenated text of this subtree.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeKind::Text(leaf) = &self.kind {
            out.push_str(&leaf.text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Count the nodes of this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DocumentNode::node_count).sum::<usize>()
    }
}

/// A document root as the content API ships it: a typeless list of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

impl RichText {
    /// Create a document from its top-level blocks.
    pub fn new(children: Vec<DocumentNode>) -> Self {
        Self { children }
    }

    /// Create a document holding a single paragraph of plain text.
    pub fn from_plain_text(text: impl Into<String>) -> Self {
        Self::new(vec![DocumentNode::paragraph(vec![DocumentNode::text(text)])])
    }

    /// Get the concatenated text of all blocks.
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(DocumentNode::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
