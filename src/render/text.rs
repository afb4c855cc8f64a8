//! Plain text renderer implementation.

use unicode_width::UnicodeWidthStr;

use crate::model::{DocumentNode, NodeKind, RichText};

use super::options::DEFAULT_ALT_TEXT;

/// Convert a document to plain text.
///
/// Blocks are separated by a blank line, list items get a `• ` or `N. `
/// marker, and table columns are padded to their display width.
pub fn to_text(doc: &RichText) -> String {
    join_blocks(&doc.children)
}

fn is_inline(node: &DocumentNode) -> bool {
    matches!(
        node.kind,
        NodeKind::Text(_)
            | NodeKind::Link(_)
            | NodeKind::Bold
            | NodeKind::Italic
            | NodeKind::Underline
            | NodeKind::Code
    )
}

fn join_blocks(nodes: &[DocumentNode]) -> String {
    if nodes.iter().all(is_inline) {
        return nodes.iter().map(inline_text).collect();
    }
    nodes
        .iter()
        .map(block_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn block_text(node: &DocumentNode) -> String {
    match &node.kind {
        NodeKind::Blockquote => join_blocks(&node.children)
            .lines()
            .map(|line| format!("> {}", line).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        NodeKind::BulletedList | NodeKind::NumberedList => {
            let mut lines = Vec::new();
            list_lines(node, 0, &mut lines);
            lines.join("\n")
        }
        NodeKind::Table => table_text(node),
        NodeKind::CodeBlock => node.plain_text(),
        NodeKind::Image(_) | NodeKind::Video(_) => media_placeholder(node),
        _ if is_inline(node) => inline_text(node),
        _ => join_blocks(&node.children),
    }
}

fn inline_text(node: &DocumentNode) -> String {
    match &node.kind {
        NodeKind::Text(leaf) => leaf.text.clone(),
        NodeKind::Image(_) | NodeKind::Video(_) => media_placeholder(node),
        _ => node.children.iter().map(inline_text).collect(),
    }
}

fn media_placeholder(node: &DocumentNode) -> String {
    match &node.kind {
        NodeKind::Image(attrs) => match attrs.alt_text.as_deref() {
            Some(alt) if alt != DEFAULT_ALT_TEXT => format!("[Image: {}]", alt),
            _ => "[Image]".to_string(),
        },
        NodeKind::Video(attrs) => match attrs.title.as_deref() {
            Some(title) => format!("[Video: {}]", title),
            None => "[Video]".to_string(),
        },
        _ => String::new(),
    }
}

fn list_lines(list: &DocumentNode, depth: usize, lines: &mut Vec<String>) {
    let numbered = matches!(list.kind, NodeKind::NumberedList);
    let indent = "  ".repeat(depth);

    for (i, item) in list.children.iter().enumerate() {
        let marker = if numbered {
            format!("{}. ", i + 1)
        } else {
            "• ".to_string()
        };

        let (nested, content): (Vec<&DocumentNode>, Vec<&DocumentNode>) = item
            .children
            .iter()
            .partition(|child| {
                matches!(child.kind, NodeKind::BulletedList | NodeKind::NumberedList)
            });

        let text = if matches!(item.kind, NodeKind::ListItem) {
            content
                .iter()
                .map(|child| block_text(child))
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            block_text(item)
        };

        lines.push(format!("{}{}{}", indent, marker, text.replace('\n', " ")));
        if matches!(item.kind, NodeKind::ListItem) {
            for sublist in nested {
                list_lines(sublist, depth + 1, lines);
            }
        }
    }
}

/// Rows of a table, with a flag for rows inside the table head.
fn table_rows(node: &DocumentNode, in_head: bool, rows: &mut Vec<(bool, Vec<String>)>) {
    for child in &node.children {
        match child.kind {
            NodeKind::TableHead => table_rows(child, true, rows),
            NodeKind::TableBody => table_rows(child, false, rows),
            NodeKind::TableRow => {
                let cells = child
                    .children
                    .iter()
                    .map(|cell| join_blocks(&cell.children).replace('\n', " "))
                    .collect();
                rows.push((in_head, cells));
            }
            _ => {}
        }
    }
}

fn table_text(table: &DocumentNode) -> String {
    let mut rows = Vec::new();
    table_rows(table, false, &mut rows);
    if rows.is_empty() {
        return String::new();
    }

    let col_count = rows.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; col_count];
    for (_, cells) in &rows {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let header_rows = rows.iter().take_while(|(head, _)| *head).count();

    for (index, (_, cells)) in rows.iter().enumerate() {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            if i + 1 < cells.len() {
                line.push_str(&" ".repeat(widths[i] - cell.width()));
            }
        }
        lines.push(line.trim_end().to_string());

        if header_rows > 0 && index + 1 == header_rows {
            let total: usize = widths.iter().sum::<usize>() + 2 * col_count.saturating_sub(1);
            lines.push("-".repeat(total));
        }
    }

    lines.join("\n")
}
