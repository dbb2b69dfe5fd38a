//! Terminal rendering of the Markdown-like narrative.

pub const BOLD: &str = "\x1b[1m";
pub const NORMAL: &str = "\x1b[22m";

/// Render links as `text <url>`, bold spans with ANSI escapes, and separate paragraphs
/// by a single blank line.
#[must_use]
pub fn to_terminal(text: &str) -> String {
    let mut output = String::new();
    let mut is_paragraph_break = false;
    for line in text.lines().map(str::trim_end) {
        if line.trim_start().is_empty() {
            is_paragraph_break = !output.is_empty();
            continue;
        }
        if is_paragraph_break {
            output.push_str("\n\n");
            is_paragraph_break = false;
        } else if !output.is_empty() {
            output.push('\n');
        }
        render_line(line, &mut output);
    }
    output
}

fn render_line(line: &str, output: &mut String) {
    let trimmed = line.trim_start();
    if let Some(heading) = trimmed.strip_prefix('#') {
        output.push_str(BOLD);
        render_inline(heading.trim_start_matches('#').trim_start(), output);
        output.push_str(NORMAL);
    } else if let Some(item) = trimmed.strip_prefix("* ").or_else(|| trimmed.strip_prefix("- ")) {
        output.push_str("  • ");
        render_inline(item, output);
    } else {
        render_inline(line, output);
    }
}

fn render_inline(mut rest: &str, output: &mut String) {
    let mut is_bold = false;
    while let Some(position) = rest.find(['*', '[']) {
        let (before, tail) = rest.split_at(position);
        output.push_str(before);
        if let Some(tail) = tail.strip_prefix("**") {
            output.push_str(if is_bold { NORMAL } else { BOLD });
            is_bold = !is_bold;
            rest = tail;
        } else if let Some((label, url, tail)) = split_link(tail) {
            output.push_str(label);
            output.push_str(" <");
            output.push_str(url);
            output.push('>');
            rest = tail;
        } else {
            // Lone `*` or `[`, both are one byte long.
            output.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }
    output.push_str(rest);
    if is_bold {
        output.push_str(NORMAL);
    }
}

/// Split `[label](url)tail` into its parts.
fn split_link(text: &str) -> Option<(&str, &str, &str)> {
    let (label, rest) = text.strip_prefix('[')?.split_once("](")?;
    if label.contains(['[', ']']) {
        return None;
    }
    let (url, tail) = rest.split_once(')')?;
    if url.is_empty() || url.contains(char::is_whitespace) {
        return None;
    }
    Some((label, url, tail))
}
