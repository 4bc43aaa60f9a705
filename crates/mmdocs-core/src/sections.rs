//! Header-delimited section extraction.
//!
//! A section is the minimal self-contained excerpt around a search match:
//! it starts at the nearest markdown header at or above the matched line and
//! ends just before the next header of equal or shallower depth (or at end
//! of document). When no header precedes a match the matched line itself
//! opens the section and is treated as mid-level (depth 3).

use once_cell::sync::Lazy;
use regex::Regex;

/// Depth assigned to a section whose match has no enclosing header.
pub const FALLBACK_DEPTH: usize = 3;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"^(#{1,6})\s").unwrap()
});

/// Depth of a markdown header line (`# foo` is 1, `###### foo` is 6).
///
/// Returns `None` for non-header lines, including `#`-runs longer than six
/// and `#`-runs not followed by whitespace.
#[must_use]
pub fn header_depth(line: &str) -> Option<usize> {
    HEADER_RE.captures(line).map(|caps| caps[1].len())
}

/// A contiguous excerpt of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// First line of the section (0-based, inclusive); the header line, or
    /// the matched line when no header precedes it.
    pub start_line: usize,
    /// End boundary (0-based, exclusive).
    pub end_line: usize,
    /// Header depth governing the end boundary.
    pub depth: usize,
    /// Section lines joined with `\n`.
    pub text: String,
}

/// Extract every header-delimited section of `text` containing `term`.
///
/// Sections are emitted in document order. After a section is emitted the
/// scan resumes at its end boundary, so a second match inside the same
/// section never produces a duplicate. A document with N disjoint matching
/// regions yields at most N sections.
#[must_use]
pub fn extract_sections(text: &str, term: &str, case_sensitive: bool) -> Vec<Section> {
    if term.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = text.lines().collect();
    let needle = if case_sensitive {
        term.to_string()
    } else {
        term.to_lowercase()
    };

    let mut sections = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let haystack;
        let line: &str = if case_sensitive {
            lines[i]
        } else {
            haystack = lines[i].to_lowercase();
            &haystack
        };

        if !line.contains(&needle) {
            i += 1;
            continue;
        }

        // Scan backward for the nearest header at or above the match.
        let (start, depth) = (0..=i)
            .rev()
            .find_map(|j| header_depth(lines[j]).map(|d| (j, d)))
            .unwrap_or((i, FALLBACK_DEPTH));

        // The section ends at the next header of equal or shallower depth.
        let end = (start + 1..lines.len())
            .find(|&k| header_depth(lines[k]).is_some_and(|d| d <= depth))
            .unwrap_or(lines.len());

        sections.push(Section {
            start_line: start,
            end_line: end,
            depth,
            text: lines[start..end].join("\n"),
        });

        i = end;
    }

    sections
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Flowcharts - Basic Syntax\n\
\n\
Flowcharts are composed of **nodes** and **edges**.\n\
\n\
## Nodes\n\
\n\
### A node (default)\n\
\n\
This is a basic node.\n\
\n\
## Edges\n\
\n\
### Links with arrows\n\
\n\
Arrows can be used to show direction.";

    #[test]
    fn test_header_depth() {
        assert_eq!(header_depth("# Header 1"), Some(1));
        assert_eq!(header_depth("## Header 2"), Some(2));
        assert_eq!(header_depth("### Header 3"), Some(3));
        assert_eq!(header_depth("#### Header 4"), Some(4));
        assert_eq!(header_depth("###### Header 6"), Some(6));

        assert_eq!(header_depth("plain text"), None);
        assert_eq!(header_depth("####### too deep"), None);
        assert_eq!(header_depth("#nospace"), None);
        assert_eq!(header_depth(""), None);
    }

    #[test]
    fn test_match_scoped_to_nearest_header() {
        let sections = extract_sections(SAMPLE, "arrows", false);

        assert_eq!(sections.len(), 1);
        let section = &sections[0];
        assert!(section.text.starts_with("### Links with arrows"));
        assert!(section.text.contains("Arrows can be used"));
        assert_eq!(section.depth, 3);
        // Last section runs to end of document.
        assert_eq!(section.end_line, SAMPLE.lines().count());
    }

    #[test]
    fn test_shallow_section_spans_deeper_subsections() {
        // A match under a depth-1 header is bounded only by the next depth-1
        // header (or end of document), so deeper subsections stay inside.
        let text = "# Flowcharts\n\nArrows show direction.\n\n## Edges\n\nMore edges text.";
        let sections = extract_sections(text, "arrows", false);

        assert_eq!(sections.len(), 1);
        let section = &sections[0];
        assert!(section.text.starts_with("# Flowcharts"));
        assert!(section.text.contains("Arrows show direction."));
        assert_eq!(section.depth, 1);
        assert!(section.text.contains("## Edges"));
        assert_eq!(section.end_line, text.lines().count());
    }

    #[test]
    fn test_section_ends_before_equal_depth_header() {
        let text = "## First\n\ntarget here\n\n## Second\n\nother text";
        let sections = extract_sections(text, "target", false);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].start_line, 0);
        assert_eq!(sections[0].end_line, 4);
        assert!(!sections[0].text.contains("## Second"));
    }

    #[test]
    fn test_no_preceding_header_uses_match_line() {
        let text = "intro text with target\nmore text\n## Later";
        let sections = extract_sections(text, "target", false);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].start_line, 0);
        assert_eq!(sections[0].depth, FALLBACK_DEPTH);
        // Depth 3 fallback ends at the depth-2 header.
        assert_eq!(sections[0].end_line, 2);
    }

    #[test]
    fn test_two_matches_in_one_section_yield_one_section() {
        let text = "## Arrows\n\narrow one\narrow two\n\n## Other";
        let sections = extract_sections(text, "arrow", false);

        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_disjoint_matches_yield_ordered_sections() {
        let text = "## Alpha\n\narrow here\n\n## Beta\n\nno match\n\n## Gamma\n\narrow again";
        let sections = extract_sections(text, "arrow", false);

        assert_eq!(sections.len(), 2);
        assert!(sections[0].text.starts_with("## Alpha"));
        assert!(sections[1].text.starts_with("## Gamma"));
        assert!(sections[0].end_line <= sections[1].start_line);
    }

    #[test]
    fn test_case_sensitivity() {
        let text = "## Section\n\nArrows here";

        assert_eq!(extract_sections(text, "ARROWS", false).len(), 1);
        assert_eq!(extract_sections(text, "ARROWS", true).len(), 0);
        assert_eq!(extract_sections(text, "Arrows", true).len(), 1);
    }

    #[test]
    fn test_match_on_header_line_itself() {
        let sections = extract_sections(SAMPLE, "## Edges", true);

        assert_eq!(sections.len(), 1);
        assert!(sections[0].text.starts_with("## Edges"));
        assert_eq!(sections[0].depth, 2);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(extract_sections("", "term", false).is_empty());
        assert!(extract_sections("some text", "", false).is_empty());
        assert!(extract_sections("some text", "absent", false).is_empty());
    }

    #[test]
    fn test_every_section_contains_the_term() {
        let sections = extract_sections(SAMPLE, "node", false);
        assert!(!sections.is_empty());
        for section in &sections {
            assert!(section.text.to_lowercase().contains("node"));
        }
    }
}
