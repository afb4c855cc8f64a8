//! Presentation tree produced by the renderer.

/// HTML elements the rendering rules emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    A,
    Blockquote,
    Code,
    Div,
    Em,
    Figcaption,
    Figure,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Img,
    Li,
    Ol,
    P,
    Pre,
    Source,
    Span,
    Strong,
    Table,
    Tbody,
    Td,
    Th,
    Thead,
    Tr,
    Track,
    U,
    Ul,
    Video,
}

impl Tag {
    /// Element name as written in HTML.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::A => "a",
            Tag::Blockquote => "blockquote",
            Tag::Code => "code",
            Tag::Div => "div",
            Tag::Em => "em",
            Tag::Figcaption => "figcaption",
            Tag::Figure => "figure",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::H5 => "h5",
            Tag::H6 => "h6",
            Tag::Img => "img",
            Tag::Li => "li",
            Tag::Ol => "ol",
            Tag::P => "p",
            Tag::Pre => "pre",
            Tag::Source => "source",
            Tag::Span => "span",
            Tag::Strong => "strong",
            Tag::Table => "table",
            Tag::Tbody => "tbody",
            Tag::Td => "td",
            Tag::Th => "th",
            Tag::Thead => "thead",
            Tag::Tr => "tr",
            Tag::Track => "track",
            Tag::U => "u",
            Tag::Ul => "ul",
            Tag::Video => "video",
        }
    }

    /// Void elements have no closing tag and no children.
    pub fn is_void(&self) -> bool {
        matches!(self, Tag::Img | Tag::Source | Tag::Track)
    }

    /// Heading element for a level (1-6).
    pub fn heading(level: u8) -> Tag {
        match level {
            1 => Tag::H1,
            2 => Tag::H2,
            3 => Tag::H3,
            4 => Tag::H4,
            5 => Tag::H5,
            _ => Tag::H6,
        }
    }
}

/// An element attribute. A `None` value is a boolean attribute (`controls`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub value: Option<String>,
}

/// An element of the presentation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub attributes: Vec<Attribute>,
    pub children: Vec<OutputNode>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name,
            value: Some(value.into()),
        });
        self
    }

    /// Add an attribute if a value is present.
    pub fn with_opt_attr(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.with_attr(name, v),
            None => self,
        }
    }

    /// Add a boolean attribute.
    pub fn with_flag(mut self, name: &'static str) -> Self {
        self.attributes.push(Attribute { name, value: None });
        self
    }

    /// Add a `class` attribute if a class is given.
    pub fn with_class(self, class: Option<&str>) -> Self {
        self.with_opt_attr("class", class)
    }

    /// Set the children.
    pub fn with_children(mut self, children: Vec<OutputNode>) -> Self {
        self.children = children;
        self
    }

    /// Append a child.
    pub fn push(&mut self, child: OutputNode) {
        self.children.push(child);
    }

    /// Look up an attribute value. Boolean attributes yield `Some("")`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// Check if an attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Find the first descendant element (depth-first, including self) with a tag.
    pub fn find(&self, tag: Tag) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            OutputNode::Element(el) => el.find(tag),
            OutputNode::Text(_) => None,
        })
    }
}

/// A node of the presentation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNode {
    Text(String),
    Element(Element),
}

/// The renderer's output for one document node.
pub type OutputTree = OutputNode;

impl OutputNode {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        OutputNode::Text(text.into())
    }

    /// Get the element, if this is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            OutputNode::Element(el) => Some(el),
            OutputNode::Text(_) => None,
        }
    }

    /// Get the tag, if this is an element.
    pub fn tag(&self) -> Option<Tag> {
        self.as_element().map(|el| el.tag)
    }

    /// Children of an element; empty for text.
    pub fn children(&self) -> &[OutputNode] {
        match self {
            OutputNode::Element(el) => &el.children,
            OutputNode::Text(_) => &[],
        }
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        match self {
            OutputNode::Text(text) => text.clone(),
            OutputNode::Element(el) => el.children.iter().map(OutputNode::text_content).collect(),
        }
    }
}

impl From<Element> for OutputNode {
    fn from(el: Element) -> Self {
        OutputNode::Element(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        assert_eq!(Tag::Figcaption.name(), "figcaption");
        assert_eq!(Tag::heading(3), Tag::H3);
        assert!(Tag::Img.is_void());
        assert!(!Tag::Video.is_void());
    }

    #[test]
    fn test_element_attributes() {
        let el = Element::new(Tag::Video)
            .with_flag("controls")
            .with_class(Some("w-full"))
            .with_opt_attr("title", None);
        assert!(el.has_attr("controls"));
        assert_eq!(el.attr("controls"), Some(""));
        assert_eq!(el.attr("class"), Some("w-full"));
        assert!(!el.has_attr("title"));
    }

    #[test]
    fn test_text_content_and_find() {
        let node: OutputNode = Element::new(Tag::P)
            .with_children(vec![
                OutputNode::text("Hello "),
                Element::new(Tag::Strong)
                    .with_children(vec![OutputNode::text("world")])
                    .into(),
            ])
            .into();
        assert_eq!(node.text_content(), "Hello world");
        let strong = node.as_element().and_then(|el| el.find(Tag::Strong));
        assert!(strong.is_some());
        assert_eq!(node.children().len(), 2);
    }
}
