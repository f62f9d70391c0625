//! Plain-text output of rendered lines

use crate::tree::render::{Line, SeparatorKind};
use std::io::{self, Write};

const NODE_RULE: &str = "────────────────";
const ITEM_RULE: &str = "········";

/// Write lines as an indented text tree. Sections are separated by a blank line.
pub fn write_text<W: Write>(lines: &[Line], out: &mut W) -> io::Result<()> {
    let mut first_header = true;

    for line in lines {
        match line {
            Line::Header { label, open, .. } => {
                if !first_header {
                    writeln!(out)?;
                }
                first_header = false;
                writeln!(out, "{} {}", marker(*open), label)?;
            }
            Line::Leaf { depth, key, value, .. } => {
                let pad = indent(*depth);
                write_value(out, &format!("{}{}: ", pad, key), &pad, value)?;
            }
            Line::Branch { depth, key, summary, expanded, .. } => {
                writeln!(out, "{}{} {}  {}", indent(*depth), marker(*expanded), key, summary)?;
            }
            Line::Item { depth, value, .. } => {
                let pad = indent(*depth);
                write_value(out, &format!("{}- ", pad), &pad, value)?;
            }
            Line::Separator { depth, kind } => {
                let rule = match kind {
                    SeparatorKind::Node => NODE_RULE,
                    SeparatorKind::Item => ITEM_RULE,
                };
                writeln!(out, "{}{}", indent(*depth), rule)?;
            }
        }
    }

    Ok(())
}

/// Render lines to a string
pub fn to_text(lines: &[Line]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_text(lines, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn marker(expanded: bool) -> &'static str {
    if expanded {
        "▾"
    } else {
        "▸"
    }
}

/// Section bodies sit two columns in from their header
fn indent(depth: usize) -> String {
    " ".repeat(2 + depth)
}

/// Pretty-printed fallbacks span several lines; continuation lines hang under the label
fn write_value<W: Write>(out: &mut W, lead: &str, pad: &str, value: &str) -> io::Result<()> {
    let mut parts = value.lines();
    writeln!(out, "{}{}", lead, parts.next().unwrap_or(""))?;
    for part in parts {
        writeln!(out, "{}    {}", pad, part)?;
    }
    Ok(())
}
