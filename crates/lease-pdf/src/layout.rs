//! Text measurement and word wrapping
//!
//! Widths are approximated from Helvetica advance classes, which is close
//! enough for margin-respecting wrap of lease prose. Exact metrics would
//! require embedding a font program, which the documents do not need.

/// Approximate advance width of `c` in em units.
fn char_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | '"' | ' ' => 0.33,
        'm' | 'w' | 'M' | 'W' | '@' => 0.89,
        'A'..='Z' | '$' | '#' | '&' | '%' => 0.72,
        '0'..='9' => 0.56,
        _ => 0.5,
    }
}

/// Approximate rendered width of `text` at `size` points.
pub(crate) fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(char_em).sum::<f32>() * size
}

/// Greedy word wrap to `max_width` points.
///
/// A single word wider than the line is emitted on its own line rather
/// than split, so wrapping always terminates.
pub(crate) fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };

        if text_width(&candidate, size) <= max_width || line.is_empty() {
            line = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
