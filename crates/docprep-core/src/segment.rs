//! Structural text segmenter.
//!
//! Splits raw document text into an ordered sequence of atomic
//! [`Segment`]s — headings, paragraphs, fenced code blocks, list items —
//! using lightweight line-pattern rules. No markup parser is involved:
//! scraped documentation arrives with markdown remnants at best, so the
//! rules only look at how each line starts.
//!
//! Segments tile the input. Every line, including blank separator lines,
//! is attached to exactly one segment (separators go to the preceding
//! segment; whitespace before the first block goes to the first segment),
//! so concatenating all segment texts in order reproduces the input
//! byte-for-byte. Downstream reconstruction of a document from its chunks
//! depends on this.
//!
//! The segmenter never fails. Malformed markup degrades: a `#` line that
//! is not a well-formed heading becomes [`SegmentKind::Other`], and an
//! unterminated code fence runs to the end of the input as a single
//! `Code` segment.

use crate::models::{Segment, SegmentKind};

/// Split `content` into ordered, structurally classified segments.
///
/// Empty or whitespace-only input yields an empty Vec — callers treat
/// this as "zero chunks", not an error.
pub fn segment(content: &str) -> Vec<Segment> {
    let mut blocks: Vec<String> = Vec::new();
    let mut leading = String::new();
    let mut in_fence = false;
    // Whether the last block still accepts continuation lines.
    let mut open = false;

    for line in content.split_inclusive('\n') {
        if in_fence {
            if let Some(last) = blocks.last_mut() {
                last.push_str(line);
            }
            if line.trim_start().starts_with("```") {
                in_fence = false;
            }
            continue;
        }

        if line.trim().is_empty() {
            // Separator whitespace belongs to the block it follows.
            match blocks.last_mut() {
                Some(last) => last.push_str(line),
                None => leading.push_str(line),
            }
            open = false;
            continue;
        }

        let marker = line.trim_start();
        if marker.starts_with("```") {
            blocks.push(line.to_string());
            in_fence = true;
            open = false;
            continue;
        }
        if is_heading(marker) {
            // Headings are single-line units even without a blank line
            // before or after.
            blocks.push(line.to_string());
            open = false;
            continue;
        }
        if open {
            if let Some(last) = blocks.last_mut() {
                last.push_str(line);
            }
        } else {
            blocks.push(line.to_string());
            open = true;
        }
    }

    if blocks.is_empty() {
        return Vec::new();
    }
    if !leading.is_empty() {
        blocks[0].insert_str(0, &leading);
    }

    let mut segments: Vec<Segment> = Vec::new();
    for block in blocks {
        let first = block
            .lines()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("")
            .trim_start();
        if first.starts_with("```") {
            push_segment(&mut segments, block, SegmentKind::Code);
        } else if is_heading(first) {
            push_segment(&mut segments, block, SegmentKind::Heading);
        } else if is_list_marker(first) {
            for item in split_list_items(&block) {
                push_segment(&mut segments, item, SegmentKind::ListItem);
            }
        } else if first.starts_with('#') {
            push_segment(&mut segments, block, SegmentKind::Other);
        } else {
            push_segment(&mut segments, block, SegmentKind::Paragraph);
        }
    }
    segments
}

fn push_segment(segments: &mut Vec<Segment>, text: String, kind: SegmentKind) {
    let order = segments.len();
    segments.push(Segment { text, kind, order });
}

/// 1–6 `#` markers followed by a space.
fn is_heading(line: &str) -> bool {
    let stripped = line.trim_start_matches('#');
    let level = line.len() - stripped.len();
    (1..=6).contains(&level) && stripped.starts_with(' ')
}

/// `- `, `* `, `+ `, or an ordered marker like `3. `.
fn is_list_marker(line: &str) -> bool {
    if line.starts_with("- ") || line.starts_with("* ") || line.starts_with("+ ") {
        return true;
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with(". ")
}

/// Split a list block into one piece per marker line; continuation lines
/// stay with their item, trailing separator lines with the last item.
fn split_list_items(block: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for line in block.split_inclusive('\n') {
        let starts_item = is_list_marker(line.trim_start());
        match items.last_mut() {
            Some(last) if !starts_item => last.push_str(line),
            _ => items.push(line.to_string()),
        }
    }
    // Whitespace hoisted in front of the block must not become an item of
    // its own.
    if items.len() >= 2 && items[0].trim().is_empty() {
        let blanks = items.remove(0);
        items[0].insert_str(0, &blanks);
    }
    items
}
