//! Fixed-radius context windows around a matched line.
//!
//! Used by line-indexed search to show a few lines of surrounding text for
//! each match. The matched line carries a `>>> ` marker; context lines are
//! indented so the match stands out in plain-text output.

/// Prefix rendered before the matched line.
const MATCH_MARKER: &str = ">>> ";
/// Prefix rendered before context lines.
const CONTEXT_MARKER: &str = "    ";

/// A matched line with its surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchWindow {
    /// Matched line number (1-based).
    pub line: usize,
    /// Matched line text, trailing whitespace trimmed.
    pub text: String,
    /// Up to `radius` lines preceding the match.
    pub before: Vec<String>,
    /// Up to `radius` lines following the match.
    pub after: Vec<String>,
}

impl MatchWindow {
    /// Render the window as marked display lines: context indented, the
    /// matched line prefixed with `>>> `.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.before.len() + 1 + self.after.len());
        for line in &self.before {
            out.push(format!("{CONTEXT_MARKER}{line}"));
        }
        out.push(format!("{MATCH_MARKER}{}", self.text));
        for line in &self.after {
            out.push(format!("{CONTEXT_MARKER}{line}"));
        }
        out
    }
}

/// Build the context window for a match at `index` (0-based) with the given
/// radius.
///
/// Before/after sides are clamped to the document boundaries: a match on the
/// first or last line simply has an empty side, and radius 0 yields no
/// context at all.
#[must_use]
pub fn context_window(lines: &[&str], index: usize, radius: usize) -> MatchWindow {
    let start = index.saturating_sub(radius);
    let end = (index + radius).min(lines.len().saturating_sub(1));

    MatchWindow {
        line: index + 1,
        text: lines[index].trim_end().to_string(),
        before: lines[start..index].iter().map(|l| (*l).to_string()).collect(),
        after: lines[index + 1..=end].iter().map(|l| (*l).to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: [&str; 7] = ["zero", "one", "two", "three", "four", "five", "six"];

    #[test]
    fn test_symmetric_window_away_from_boundaries() {
        let window = context_window(&LINES, 3, 2);

        assert_eq!(window.line, 4);
        assert_eq!(window.text, "three");
        assert_eq!(window.before, vec!["one", "two"]);
        assert_eq!(window.after, vec!["four", "five"]);
        assert_eq!(window.before.len(), 2);
        assert_eq!(window.after.len(), 2);
    }

    #[test]
    fn test_window_clamped_at_start() {
        let window = context_window(&LINES, 0, 3);

        assert!(window.before.is_empty());
        assert_eq!(window.after, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_window_clamped_at_end() {
        let window = context_window(&LINES, 6, 3);

        assert_eq!(window.before, vec!["three", "four", "five"]);
        assert!(window.after.is_empty());
    }

    #[test]
    fn test_zero_radius_has_no_context() {
        let window = context_window(&LINES, 3, 0);

        assert!(window.before.is_empty());
        assert!(window.after.is_empty());
        assert_eq!(window.text, "three");
    }

    #[test]
    fn test_single_line_document() {
        let window = context_window(&["only"], 0, 5);

        assert_eq!(window.line, 1);
        assert!(window.before.is_empty());
        assert!(window.after.is_empty());
    }

    #[test]
    fn test_render_marks_match_line() {
        let window = context_window(&LINES, 2, 1);
        let rendered = window.render();

        assert_eq!(rendered, vec!["    one", ">>> two", "    three"]);
    }

    #[test]
    fn test_text_trailing_whitespace_trimmed() {
        let window = context_window(&["match   "], 0, 0);
        assert_eq!(window.text, "match");
    }
}
