// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Character-count line wrapping.

/// Average glyph width as a fraction of the font size, used to estimate how
/// many characters fit on a line.
const AVG_CHAR_WIDTH_EM: f32 = 0.5;

/// Estimated characters per line for a line `width_pt` wide at `size_pt`.
pub fn estimated_chars(width_pt: f32, size_pt: f32) -> usize {
    if size_pt <= 0.0 {
        return 1;
    }
    ((width_pt / (size_pt * AVG_CHAR_WIDTH_EM)) as usize).max(1)
}

/// Wrap a multi-line string so that no line exceeds `max_width` characters.
///
/// Splits on existing newlines first, then performs simple word-wrap within each
/// paragraph. Spacing between words on the same line is kept as written;
/// spacing at a break is dropped. Words longer than `max_width` are
/// force-broken. Blank paragraphs produce no lines.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_len = 0usize;

        for (gap, word) in words_with_gaps(paragraph) {
            let word_len = word.chars().count();
            let gap_len = gap.chars().count();

            if word_len > max_width {
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                // Force-break the oversized word.
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max_width).peekable();
                current_len = 0;
                while let Some(chunk) = chunks.next() {
                    let piece: String = chunk.iter().collect();
                    if chunks.peek().is_some() {
                        result.push(piece);
                    } else {
                        current_len = chunk.len();
                        current_line = piece;
                    }
                }
            } else if current_line.is_empty() {
                current_line.push_str(word);
                current_len = word_len;
            } else if current_len + gap_len + word_len <= max_width {
                current_line.push_str(gap);
                current_line.push_str(word);
                current_len += gap_len + word_len;
            } else {
                result.push(std::mem::replace(&mut current_line, word.to_string()));
                current_len = word_len;
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    result
}

/// Each word of `paragraph` paired with the whitespace run before it.
fn words_with_gaps(paragraph: &str) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    let mut rest = paragraph;
    loop {
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        let gap = &rest[..rest.len() - trimmed.len()];
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        pairs.push((gap, &trimmed[..end]));
        rest = &trimmed[end..];
    }
    pairs
}
