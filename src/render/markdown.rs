//! Markdown renderer implementation.

use crate::model::{DocumentNode, NodeKind, RichText, TextLeaf};

use super::options::DEFAULT_ALT_TEXT;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &RichText) -> String {
    blocks(&doc.children).trim().to_string()
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

fn blocks(nodes: &[DocumentNode]) -> String {
    if nodes.iter().all(is_inline) {
        return inlines(nodes);
    }
    nodes
        .iter()
        .map(block)
        .filter(|md| !md.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn block(node: &DocumentNode) -> String {
    match &node.kind {
        NodeKind::Heading(level) => format!(
            "{} {}",
            "#".repeat(usize::from(level.level())),
            blocks(&node.children).replace('\n', " ")
        ),
        NodeKind::Blockquote => blocks(&node.children)
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {}", line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        NodeKind::BulletedList | NodeKind::NumberedList => {
            let mut lines = Vec::new();
            list(node, "", &mut lines);
            lines.join("\n")
        }
        NodeKind::Table => table(node),
        NodeKind::CodeBlock => {
            let code = node.plain_text();
            let fence = code_fence(&code);
            format!("{}\n{}\n{}", fence, code.trim_end_matches('\n'), fence)
        }
        NodeKind::Image(attrs) => {
            let alt = attrs.alt_text.as_deref().unwrap_or(DEFAULT_ALT_TEXT);
            match attrs.title.as_deref() {
                Some(title) => format!(
                    "![{}]({} \"{}\")",
                    escape_markdown(alt),
                    attrs.src,
                    title.replace('"', "\\\"")
                ),
                None => format!("![{}]({})", escape_markdown(alt), attrs.src),
            }
        }
        NodeKind::Video(attrs) => match attrs.title.as_deref() {
            Some(title) => format!("[Video: {}]({})", escape_markdown(title), attrs.src),
            None => format!("[Video]({})", attrs.src),
        },
        _ if is_inline(node) => inline(node),
        _ => blocks(&node.children),
    }
}

fn inlines(nodes: &[DocumentNode]) -> String {
    nodes.iter().map(inline).collect()
}

fn inline(node: &DocumentNode) -> String {
    match &node.kind {
        NodeKind::Text(leaf) => text_leaf(leaf),
        NodeKind::Link(attrs) => {
            let label = inlines(&node.children);
            match attrs.title.as_deref() {
                Some(title) => format!(
                    "[{}]({} \"{}\")",
                    label,
                    attrs.href,
                    title.replace('"', "\\\"")
                ),
                None => format!("[{}]({})", label, attrs.href),
            }
        }
        NodeKind::Bold => emphasize(&inlines(&node.children), "**", "**"),
        NodeKind::Italic => emphasize(&inlines(&node.children), "_", "_"),
        NodeKind::Underline => emphasize(&inlines(&node.children), "<u>", "</u>"),
        NodeKind::Code => code_span(&node.plain_text()),
        _ => block(node),
    }
}

/// Apply marks innermost first: code, underline, italic, bold.
fn text_leaf(leaf: &TextLeaf) -> String {
    if leaf.text.is_empty() {
        return String::new();
    }

    let mut text = if leaf.marks.code {
        code_span(&leaf.text)
    } else {
        escape_markdown(&leaf.text)
    };

    if leaf.marks.underline {
        text = emphasize(&text, "<u>", "</u>");
    }
    if leaf.marks.italic {
        text = emphasize(&text, "_", "_");
    }
    if leaf.marks.bold {
        text = emphasize(&text, "**", "**");
    }
    text
}

/// Wrap text in markers, keeping surrounding whitespace outside them.
/// `** bold **` does not render as emphasis.
fn emphasize(text: &str, open: &str, close: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return text.to_string();
    }
    let start = text.len() - text.trim_start().len();
    let end = start + trimmed.len();
    format!("{}{}{}{}{}", &text[..start], open, trimmed, close, &text[end..])
}

fn code_span(code: &str) -> String {
    if code.contains('`') {
        format!("`` {} ``", code)
    } else {
        format!("`{}`", code)
    }
}

fn code_fence(code: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in code.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(longest.max(2) + 1)
}

fn list(node: &DocumentNode, indent: &str, lines: &mut Vec<String>) {
    let numbered = matches!(node.kind, NodeKind::NumberedList);

    for (i, item) in node.children.iter().enumerate() {
        let marker = if numbered {
            format!("{}. ", i + 1)
        } else {
            "- ".to_string()
        };
        let child_indent = format!("{}{}", indent, " ".repeat(marker.len()));

        let (nested, content): (Vec<&DocumentNode>, Vec<&DocumentNode>) =
            if matches!(item.kind, NodeKind::ListItem) {
                item.children.iter().partition(|child| {
                    matches!(child.kind, NodeKind::BulletedList | NodeKind::NumberedList)
                })
            } else {
                (Vec::new(), vec![item])
            };

        let text = content
            .iter()
            .map(|child| block(child))
            .filter(|md| !md.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("{}{}{}", indent, marker, text.replace('\n', " ")));

        for sublist in nested {
            list(sublist, &child_indent, lines);
        }
    }
}

fn table_rows(node: &DocumentNode, in_head: bool, rows: &mut Vec<(bool, Vec<String>)>) {
    for child in &node.children {
        match child.kind {
            NodeKind::TableHead => table_rows(child, true, rows),
            NodeKind::TableBody => table_rows(child, false, rows),
            NodeKind::TableRow => {
                let cells = child
                    .children
                    .iter()
                    .map(|cell| {
                        blocks(&cell.children)
                            .replace('\n', "<br>")
                            .replace('|', "\\|")
                    })
                    .collect();
                rows.push((in_head, cells));
            }
            _ => {}
        }
    }
}

/// Pipe table. The first row is the header row whether or not the
/// document marks it, since Markdown tables require one.
fn table(node: &DocumentNode) -> String {
    let mut rows = Vec::new();
    table_rows(node, false, &mut rows);
    if rows.is_empty() {
        return String::new();
    }

    let col_count = rows
        .iter()
        .map(|(_, cells)| cells.len())
        .max()
        .unwrap_or(0)
        .max(1);

    let format_row = |cells: &[String]| {
        let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
        padded.resize(col_count, "");
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (index, (_, cells)) in rows.iter().enumerate() {
        lines.push(format_row(cells));
        if index == 0 {
            lines.push(format!("|{}|", vec![" --- "; col_count].join("|")));
        }
    }
    lines.join("\n")
}

/// Escape Markdown special characters.
///
/// `*` and `_` are escaped only where they could open or close emphasis.
fn escape_markdown(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '\\' | '`' | '[' | ']' => {
                result.push('\\');
                result.push(c);
            }
            '*' | '_' => {
                let prev = if i > 0 { Some(chars[i - 1]) } else { None };
                let next = chars.get(i + 1).copied();

                let after_opener = prev.is_none_or(|p| {
                    matches!(p, '(' | '[' | '{' | ':' | '-' | '/') || p.is_whitespace()
                });
                let before_closer = next.is_none_or(|n| {
                    matches!(n, ')' | ']' | '}' | ':' | '-' | '/') || n.is_whitespace()
                });

                if after_opener && before_closer {
                    result.push(c);
                } else {
                    result.push('\\');
                    result.push(c);
                }
            }
            _ => result.push(c),
        }
    }
    result
}
