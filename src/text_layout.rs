#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    pub text: String,
    /// Char offset of the first character within the source text.
    pub start: usize,
}

/// Greedy word wrap. Words longer than `width` are broken mid-word.
pub fn wrap_lines(text: &str, width: u16) -> Vec<WrappedLine> {
    let width = usize::from(width.max(1));
    let mut out = Vec::new();
    let mut offset = 0usize;

    for hard_line in text.split('\n') {
        let chars: Vec<char> = hard_line.chars().collect();
        if chars.is_empty() {
            out.push(WrappedLine {
                text: String::new(),
                start: offset,
            });
        }
        let mut start = 0usize;
        while start < chars.len() {
            let end = if chars.len() - start <= width {
                chars.len()
            } else {
                break_point(&chars, start, width)
            };
            out.push(WrappedLine {
                text: chars[start..end].iter().collect(),
                start: offset + start,
            });
            start = end;
        }
        offset += chars.len() + 1;
    }
    out
}

pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    wrap_lines(text, width)
        .into_iter()
        .map(|line| line.text)
        .collect()
}

/// (line, column) of a char cursor inside the wrapped text.
pub fn cursor_line_col(text: &str, cursor: usize, width: u16) -> (u16, u16) {
    let lines = wrap_lines(text, width);
    let (line_idx, line) = lines
        .iter()
        .enumerate()
        .rev()
        .find(|(_, line)| line.start <= cursor)
        .unwrap_or((0, &lines[0]));
    let col = cursor.saturating_sub(line.start);
    if col >= usize::from(width.max(1)) {
        return (to_u16(line_idx + 1), 0);
    }
    (to_u16(line_idx), to_u16(col))
}

fn break_point(chars: &[char], start: usize, width: usize) -> usize {
    let limit = start + width;
    (start + 1..=limit)
        .rev()
        .find(|&idx| chars[idx - 1].is_whitespace())
        .unwrap_or(limit)
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
