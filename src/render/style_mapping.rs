//! Presentational class names per rendering slot.
//!
//! Every element a rendering rule emits occupies a slot. The mapping gives a
//! slot its `class` attribute; slots without an entry get no class. The
//! defaults are utility classes for a Tailwind-styled blog page.

use std::collections::HashMap;

/// A position in the output a class can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleSlot {
    Link,
    Figure,
    Image,
    Caption,
    VideoFrame,
    Video,
    Blockquote,
    /// Heading of the given level (1-6).
    Heading(u8),
    Paragraph,
    BulletedList,
    NumberedList,
    ListItem,
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
    /// The `code` element inside a code block.
    CodeBlockInner,
}

/// Mapping from slots to class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMapping {
    classes: HashMap<StyleSlot, String>,
}

impl StyleMapping {
    /// Create a new empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapping with the default blog classes.
    pub fn with_defaults() -> Self {
        let mut mapping = Self::new();

        mapping.set(StyleSlot::Link, "text-blue-500 hover:underline");
        mapping.set(StyleSlot::Figure, "my-4");
        mapping.set(StyleSlot::Image, "rounded-md shadow-lg");
        mapping.set(StyleSlot::Caption, "text-sm text-gray-500 mt-2 italic");
        mapping.set(StyleSlot::VideoFrame, "my-4");
        mapping.set(StyleSlot::Video, "rounded-md shadow-md w-full");
        mapping.set(
            StyleSlot::Blockquote,
            "pl-4 border-l-4 border-gray-300 italic my-4",
        );

        mapping.set(
            StyleSlot::Heading(1),
            "text-4xl font-bold mt-6 mb-4 text-gray-800",
        );
        mapping.set(
            StyleSlot::Heading(2),
            "text-3xl font-semibold mt-6 mb-4 text-gray-800",
        );
        mapping.set(
            StyleSlot::Heading(3),
            "text-2xl font-semibold mt-6 mb-4 text-gray-700",
        );
        mapping.set(
            StyleSlot::Heading(4),
            "text-xl font-semibold mt-4 mb-2 text-gray-700",
        );
        mapping.set(
            StyleSlot::Heading(5),
            "text-lg font-semibold mt-4 mb-2 text-gray-600",
        );
        mapping.set(
            StyleSlot::Heading(6),
            "text-base font-semibold mt-4 mb-2 text-gray-600",
        );

        mapping.set(StyleSlot::Paragraph, "mb-4 text-gray-700");
        mapping.set(StyleSlot::BulletedList, "list-disc list-inside my-4");
        mapping.set(StyleSlot::NumberedList, "list-decimal list-inside my-4");
        mapping.set(StyleSlot::ListItem, "mb-2");

        mapping.set(
            StyleSlot::Table,
            "table-auto w-full my-4 border-collapse border border-gray-200",
        );
        mapping.set(StyleSlot::TableHead, "bg-gray-100");
        mapping.set(StyleSlot::TableBody, "text-sm");
        mapping.set(StyleSlot::TableRow, "hover:bg-gray-50");
        mapping.set(
            StyleSlot::TableHeaderCell,
            "border border-gray-200 px-4 py-2 font-semibold text-gray-700",
        );
        mapping.set(
            StyleSlot::TableCell,
            "border border-gray-200 px-4 py-2 text-gray-600",
        );

        mapping.set(StyleSlot::Bold, "font-bold");
        mapping.set(StyleSlot::Italic, "italic");
        mapping.set(StyleSlot::Underline, "underline");
        mapping.set(
            StyleSlot::Code,
            "bg-gray-100 px-2 py-1 rounded font-mono text-sm text-red-600",
        );
        mapping.set(
            StyleSlot::CodeBlock,
            "bg-gray-800 text-gray-100 p-4 rounded-md overflow-x-auto my-4",
        );
        mapping.set(StyleSlot::CodeBlockInner, "font-mono text-sm");

        mapping
    }

    /// Set the class for a slot, replacing any previous one.
    pub fn set(&mut self, slot: StyleSlot, class: impl Into<String>) {
        self.classes.insert(slot, class.into());
    }

    /// Remove the class for a slot.
    pub fn clear(&mut self, slot: StyleSlot) {
        self.classes.remove(&slot);
    }

    /// Get the class for a slot.
    pub fn get(&self, slot: StyleSlot) -> Option<&str> {
        self.classes.get(&slot).map(String::as_str)
    }

    /// Check if the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
