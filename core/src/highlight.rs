//! Split text around case-insensitive occurrences of a search term so a
//! renderer can mark the matches.

use regex::RegexBuilder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

impl Segment {
    fn new(text: &str, matched: bool) -> Self {
        Self {
            text: text.to_string(),
            matched,
        }
    }
}

/// The term is matched literally, not as a pattern.
pub fn highlight(text: &str, term: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    let term = term.trim();
    if term.is_empty() {
        return vec![Segment::new(text, false)];
    }
    let Ok(re) = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    else {
        return vec![Segment::new(text, false)];
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::new(&text[last..m.start()], false));
        }
        segments.push(Segment::new(m.as_str(), true));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::new(&text[last..], false));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_every_occurrence_ignoring_case() {
        let segments = highlight("Love is love", "LOVE");
        assert_eq!(
            segments,
            vec![
                Segment::new("Love", true),
                Segment::new(" is ", false),
                Segment::new("love", true),
            ]
        );
    }

    #[test]
    fn blank_term_returns_whole_text() {
        assert_eq!(highlight("hello", "  "), vec![Segment::new("hello", false)]);
    }

    #[test]
    fn empty_text_has_no_segments() {
        assert!(highlight("", "x").is_empty());
    }

    #[test]
    fn pattern_characters_are_literal() {
        let segments = highlight("cost (usd) 1.5", "(usd)");
        assert_eq!(segments[1], Segment::new("(usd)", true));
        assert_eq!(segments.len(), 3);
    }
}
