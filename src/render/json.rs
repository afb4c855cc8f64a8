//! JSON renderer implementation.

use crate::error::Result;
use crate::model::RichText;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert a document to its wire-format JSON.
pub fn to_json(doc: &RichText, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(doc)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
    };
    Ok(json)
}

/// Convert a document to JSON with default formatting.
pub fn to_json_default(doc: &RichText) -> Result<String> {
    to_json(doc, JsonFormat::Pretty)
}
