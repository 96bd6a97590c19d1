//! Fixed-width word wrapping for advancement descriptions
//!
//! Greedy wrapping on single spaces. A word that does not fit on the current
//! line starts a new one; a word longer than the whole width is cut into
//! width-sized chunks regardless of word boundaries. Embedded newlines are
//! hard breaks. Widths and chunk sizes count characters, not bytes.

/// Wrap `text` into lines of at most `width` characters.
///
/// A width of zero is treated as one. Text with no words (empty or only
/// spaces) yields no lines at all rather than a single empty line, and
/// trailing empty lines from trailing newlines are dropped.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let before = lines.len();
        wrap_paragraph(paragraph, width, &mut lines);
        if lines.len() == before {
            lines.push(String::new());
        }
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn wrap_paragraph(paragraph: &str, width: usize, lines: &mut Vec<String>) {
    let mut line = String::new();
    let mut line_len = 0;

    for token in paragraph.split(' ').filter(|t| !t.is_empty()) {
        let mut word = token;
        let mut word_len = token.chars().count();

        if word_len > width {
            if line_len > 0 {
                finish_line(&mut line, lines);
                line_len = 0;
            }
            while word_len > width {
                let cut = char_boundary(word, width);
                lines.push(word[..cut].to_string());
                word = &word[cut..];
                word_len -= width;
            }
        }

        if line_len + word_len > width {
            finish_line(&mut line, lines);
            line_len = 0;
        }

        line.push_str(word);
        line.push(' ');
        line_len += word_len + 1;
    }

    if !line.is_empty() {
        finish_line(&mut line, lines);
    }
}

/// Move the current line into `lines`, dropping the trailing separator
fn finish_line(line: &mut String, lines: &mut Vec<String>) {
    lines.push(line.trim_end_matches(' ').to_string());
    line.clear();
}

/// Byte offset of the `n`th character
fn char_boundary(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}
