pub const ELLIPSIS: char = '…';

/// Text width source for label layout. The canvas backs this with the egui
/// font atlas; tests use fixed-advance fakes.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Greedy word wrap capped at `max_lines`.
///
/// Text that does not fit the budget ends in an ellipsis on the last line,
/// shortened one character at a time until it fits or a single character is
/// left.
pub fn wrap_label(
    text: &str,
    max_width: f32,
    max_lines: usize,
    font_size: f32,
    measure: &impl TextMeasure,
) -> Vec<String> {
    let words = text.split_whitespace().collect::<Vec<_>>();
    if words.is_empty() || max_lines == 0 {
        return Vec::new();
    }

    let fits = |line: &str| measure.text_width(line, font_size) <= max_width;

    let mut lines = Vec::with_capacity(max_lines);
    let mut start = 0;
    while start < words.len() {
        let mut end = start + 1;
        while end < words.len() && fits(words[start..=end].join(" ").as_str()) {
            end += 1;
        }

        let line = words[start..end].join(" ");
        let overflowing = end < words.len();
        let last_allowed = lines.len() + 1 == max_lines;
        if last_allowed && overflowing {
            let rest = words[start..].join(" ");
            lines.push(ellipsize(&rest, max_width, font_size, measure));
            break;
        }

        // only a lone word that is wider than the budget can miss here
        if fits(line.as_str()) {
            lines.push(line);
        } else {
            lines.push(ellipsize(&line, max_width, font_size, measure));
        }
        start = end;
    }

    lines
}

fn ellipsize(text: &str, max_width: f32, font_size: f32, measure: &impl TextMeasure) -> String {
    let chars = text.chars().collect::<Vec<_>>();
    let mut keep = chars.len();
    loop {
        let kept = chars[..keep].iter().collect::<String>();
        let candidate = format!("{}{ELLIPSIS}", kept.trim_end());
        if keep <= 1 || measure.text_width(&candidate, font_size) <= max_width {
            return candidate;
        }
        keep -= 1;
    }
}
