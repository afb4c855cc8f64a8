//! JSON wire format of document trees.
//!
//! The content API ships a document body as `{"children": [...]}`. Element
//! nodes carry a `type` and `children`; text leaves carry `text` plus optional
//! boolean mark flags and no `type`. Several element types have two accepted
//! spellings (`table_row` / `table-row`); writing always uses the first one
//! listed in [`element_type_name`].

use serde_json::{Map, Value};

use super::node::{
    DocumentNode, HeadingLevel, ImageAttrs, LinkAttrs, Marks, NodeKind, RichText, TextLeaf,
    VideoAttrs,
};
use crate::error::{Error, Result};

const HEADING_TYPES: [&str; 6] = [
    "heading-one",
    "heading-two",
    "heading-three",
    "heading-four",
    "heading-five",
    "heading-six",
];

const MARK_FLAGS: [&str; 4] = ["bold", "italic", "underline", "code"];

/// Parse a document from JSON text.
///
/// Accepts a document root (`{"children": [...]}`), a bare array of nodes,
/// or a single node, which becomes a one-block document.
pub fn parse_document(input: &str) -> Result<RichText> {
    let value: Value = serde_json::from_str(input)?;
    document_from_value(value)
}

/// Build a document from an already parsed JSON value.
pub fn document_from_value(value: Value) -> Result<RichText> {
    match value {
        Value::Array(items) => Ok(RichText::new(nodes_from_values(items)?)),
        Value::Object(mut map) if is_root(&map) => {
            let children = map.remove("children").unwrap_or(Value::Null);
            Ok(RichText::new(children_from_value(children)?))
        }
        other => Ok(RichText::new(vec![node_from_value(other)?])),
    }
}

fn is_root(map: &Map<String, Value>) -> bool {
    !map.contains_key("type") && !map.contains_key("text") && map.contains_key("children")
}

/// Build a single node from a JSON value.
pub fn node_from_value(value: Value) -> Result<DocumentNode> {
    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(Error::InvalidInput(format!(
                "expected a node object, found {}",
                json_type_name(&other)
            )))
        }
    };

    let node_type = match map.remove("type") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            return Err(Error::InvalidInput(format!(
                "node type must be a string, found {}",
                json_type_name(&other)
            )))
        }
    };

    match node_type.as_deref() {
        None | Some("text") => return text_from_map(&map),
        _ => {}
    }
    let node_type = node_type.unwrap_or_default();

    let children = children_from_value(map.remove("children").unwrap_or(Value::Null))?;

    let kind = match node_type.as_str() {
        "paragraph" => NodeKind::Paragraph,
        "heading" => {
            let level = map
                .get("level")
                .and_then(Value::as_u64)
                .ok_or_else(|| Error::InvalidInput("heading without a numeric level".into()))?;
            NodeKind::Heading(heading_level(level)?)
        }
        t if HEADING_TYPES.contains(&t) => {
            let position = HEADING_TYPES.iter().position(|h| *h == t).unwrap_or(0);
            NodeKind::Heading(heading_level(position as u64 + 1)?)
        }
        "bulleted-list" => NodeKind::BulletedList,
        "numbered-list" => NodeKind::NumberedList,
        "list-item" => NodeKind::ListItem,
        "link" => NodeKind::Link(LinkAttrs {
            href: required_str(&map, "href", "link")?,
            title: optional_str(&map, "title"),
            open_in_new_tab: map.get("openInNewTab").and_then(Value::as_bool),
        }),
        "image" => {
            let attrs = ImageAttrs {
                src: required_str(&map, "src", "image")?,
                title: optional_str(&map, "title"),
                alt_text: optional_str(&map, "altText"),
                width: optional_u32(&map, "width"),
                height: optional_u32(&map, "height"),
                mime_type: optional_str(&map, "mimeType"),
            };
            return media_node(NodeKind::Image(attrs), children);
        }
        "video" => {
            let attrs = VideoAttrs {
                src: required_str(&map, "src", "video")?,
                title: optional_str(&map, "title"),
                width: optional_u32(&map, "width"),
                height: optional_u32(&map, "height"),
                mime_type: optional_str(&map, "mimeType"),
            };
            return media_node(NodeKind::Video(attrs), children);
        }
        "block-quote" | "blockquote" => NodeKind::Blockquote,
        "table" => NodeKind::Table,
        "table_head" | "table-head" => NodeKind::TableHead,
        "table_body" | "table-body" => NodeKind::TableBody,
        "table_row" | "table-row" => NodeKind::TableRow,
        "table_header_cell" | "table-header-cell" => NodeKind::TableHeaderCell,
        "table_cell" | "table-cell" => NodeKind::TableCell,
        "bold" => NodeKind::Bold,
        "italic" => NodeKind::Italic,
        "underline" => NodeKind::Underline,
        "code" => NodeKind::Code,
        "code-block" => NodeKind::CodeBlock,
        _ => NodeKind::Unknown(node_type),
    };

    Ok(DocumentNode::new(kind, children))
}

fn text_from_map(map: &Map<String, Value>) -> Result<DocumentNode> {
    let text = match map.get("text") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(Error::InvalidInput(format!(
                "text must be a string, found {}",
                json_type_name(other)
            )))
        }
        None => {
            return Err(Error::InvalidInput(
                "node has neither a type nor text".into(),
            ))
        }
    };

    let flag = |name: &str| map.get(name).and_then(Value::as_bool).unwrap_or(false);
    let marks = Marks {
        bold: flag("bold"),
        italic: flag("italic"),
        underline: flag("underline"),
        code: flag("code"),
    };

    Ok(DocumentNode::styled_text(text, marks))
}

/// Media nodes are leaves. The content API pads them with an empty text
/// child, which is discarded; any real content is rejected.
fn media_node(kind: NodeKind, children: Vec<DocumentNode>) -> Result<DocumentNode> {
    let has_content = children.iter().any(|child| match &child.kind {
        NodeKind::Text(leaf) => !leaf.text.is_empty() || !child.children.is_empty(),
        _ => true,
    });
    if has_content {
        return Err(Error::InvalidInput(format!(
            "{} node cannot have content children",
            kind.name()
        )));
    }
    Ok(DocumentNode::new(kind, Vec::new()))
}

fn children_from_value(value: Value) -> Result<Vec<DocumentNode>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => nodes_from_values(items),
        other => Err(Error::InvalidInput(format!(
            "children must be an array, found {}",
            json_type_name(&other)
        ))),
    }
}

fn nodes_from_values(items: Vec<Value>) -> Result<Vec<DocumentNode>> {
    items.into_iter().map(node_from_value).collect()
}

fn heading_level(level: u64) -> Result<HeadingLevel> {
    u8::try_from(level)
        .ok()
        .and_then(HeadingLevel::from_number)
        .ok_or_else(|| Error::InvalidInput(format!("heading level {} is outside 1-6", level)))
}

fn required_str(map: &Map<String, Value>, key: &str, kind: &str) -> Result<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidInput(format!("{} node without '{}'", kind, key)))
}

fn optional_str(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn optional_u32(map: &Map<String, Value>, key: &str) -> Option<u32> {
    map.get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Wire `type` written for an element kind. `None` for text leaves.
pub fn element_type_name(kind: &NodeKind) -> Option<&str> {
    let name = match kind {
        NodeKind::Text(_) => return None,
        NodeKind::Heading(level) => HEADING_TYPES[usize::from(level.level() - 1)],
        NodeKind::Blockquote => "block-quote",
        NodeKind::TableHead => "table_head",
        NodeKind::TableBody => "table_body",
        NodeKind::TableRow => "table_row",
        NodeKind::TableHeaderCell => "table_header_cell",
        NodeKind::TableCell => "table_cell",
        other => other.name(),
    };
    Some(name)
}

/// Convert a node into its wire JSON value.
pub fn node_to_value(node: DocumentNode) -> Value {
    let mut map = Map::new();

    if let NodeKind::Text(TextLeaf { text, marks }) = &node.kind {
        map.insert("text".into(), Value::String(text.clone()));
        let flags = [marks.bold, marks.italic, marks.underline, marks.code];
        for (name, set) in MARK_FLAGS.iter().zip(flags) {
            if set {
                map.insert((*name).into(), Value::Bool(true));
            }
        }
        return Value::Object(map);
    }

    if let Some(name) = element_type_name(&node.kind) {
        map.insert("type".into(), Value::String(name.to_string()));
    }

    match node.kind {
        NodeKind::Link(attrs) => {
            map.insert("href".into(), Value::String(attrs.href));
            insert_opt_str(&mut map, "title", attrs.title);
            if let Some(flag) = attrs.open_in_new_tab {
                map.insert("openInNewTab".into(), Value::Bool(flag));
            }
        }
        NodeKind::Image(attrs) => {
            map.insert("src".into(), Value::String(attrs.src));
            insert_opt_str(&mut map, "title", attrs.title);
            insert_opt_str(&mut map, "altText", attrs.alt_text);
            insert_opt_u32(&mut map, "width", attrs.width);
            insert_opt_u32(&mut map, "height", attrs.height);
            insert_opt_str(&mut map, "mimeType", attrs.mime_type);
        }
        NodeKind::Video(attrs) => {
            map.insert("src".into(), Value::String(attrs.src));
            insert_opt_str(&mut map, "title", attrs.title);
            insert_opt_u32(&mut map, "width", attrs.width);
            insert_opt_u32(&mut map, "height", attrs.height);
            insert_opt_str(&mut map, "mimeType", attrs.mime_type);
        }
        _ => {}
    }

    let children = node.children.into_iter().map(node_to_value).collect();
    map.insert("children".into(), Value::Array(children));
    Value::Object(map)
}

fn insert_opt_str(map: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(v) = value {
        map.insert(key.into(), Value::String(v));
    }
}

fn insert_opt_u32(map: &mut Map<String, Value>, key: &str, value: Option<u32>) {
    if let Some(v) = value {
        map.insert(key.into(), Value::from(v));
    }
}

impl TryFrom<Value> for DocumentNode {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        node_from_value(value)
    }
}

impl From<DocumentNode> for Value {
    fn from(node: DocumentNode) -> Self {
        node_to_value(node)
    }
}
