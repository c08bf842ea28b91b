//! Section header matching shared by the tokenizer and the description parser

use std::ops::Range;

/// Character spans of a `[Name]` or `[Name]:[Base]` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    /// Column of the opening `[`
    pub open: usize,
    pub name: Range<usize>,
    /// `]:[` run between name and base, whitespace included
    pub bridge: Option<Range<usize>>,
    pub base: Option<Range<usize>>,
    /// Column of the final `]`
    pub close: usize,
}

impl SectionHeader {
    /// Section name as text
    #[must_use]
    pub fn name_text(&self, chars: &[char]) -> String {
        chars[self.name.clone()].iter().collect()
    }

    /// Base section name as text, if the header declares one
    #[must_use]
    pub fn base_text(&self, chars: &[char]) -> Option<String> {
        self.base.clone().map(|range| chars[range].iter().collect())
    }
}

/// Match a section header over a comment-free line
///
/// Surrounding whitespace and whitespace around `:` are allowed. Names must be
/// non-empty and may not contain `[`, `]` or `"`.
#[must_use]
pub fn parse_section_header(chars: &[char]) -> Option<SectionHeader> {
    let open = skip_whitespace(chars, 0);
    let (name, first_close) = bracketed(chars, open)?;

    let after = skip_whitespace(chars, first_close + 1);
    if after == chars.len() {
        return Some(SectionHeader {
            open,
            name,
            bridge: None,
            base: None,
            close: first_close,
        });
    }

    if chars[after] != ':' {
        return None;
    }

    let base_open = skip_whitespace(chars, after + 1);
    let (base, close) = bracketed(chars, base_open)?;
    if skip_whitespace(chars, close + 1) != chars.len() {
        return None;
    }

    Some(SectionHeader {
        open,
        name,
        bridge: Some(first_close..base_open + 1),
        base: Some(base),
        close,
    })
}

/// Match `[text]` starting at `open`, returning the inner span and the `]` column
fn bracketed(chars: &[char], open: usize) -> Option<(Range<usize>, usize)> {
    if chars.get(open) != Some(&'[') {
        return None;
    }

    let start = open + 1;
    let mut i = start;
    while i < chars.len() && !matches!(chars[i], '[' | ']' | '"') {
        i += 1;
    }

    if i == start || chars.get(i) != Some(&']') {
        return None;
    }
    Some((start..i, i))
}

fn skip_whitespace(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_simple_header() {
        let line = chars("  [Infantry]  ");
        let header = parse_section_header(&line).unwrap();
        assert_eq!(header.open, 2);
        assert_eq!(header.name, 3..11);
        assert_eq!(header.close, 11);
        assert_eq!(header.name_text(&line), "Infantry");
        assert!(header.base.is_none());
    }

    #[test]
    fn test_inherited_header() {
        let line = chars("[E1]:[Soldier]");
        let header = parse_section_header(&line).unwrap();
        assert_eq!(header.name_text(&line), "E1");
        assert_eq!(header.bridge, Some(3..6));
        assert_eq!(header.base_text(&line).as_deref(), Some("Soldier"));
        assert_eq!(header.close, 13);
    }

    #[test]
    fn test_whitespace_around_colon() {
        let line = chars("[E1] : [Soldier]");
        let header = parse_section_header(&line).unwrap();
        assert_eq!(header.bridge, Some(3..8));
        assert_eq!(header.base_text(&line).as_deref(), Some("Soldier"));
    }

    #[test]
    fn test_rejects_malformed_headers() {
        assert!(parse_section_header(&chars("[]")).is_none());
        assert!(parse_section_header(&chars("[Open")).is_none());
        assert!(parse_section_header(&chars("[A] trailing")).is_none());
        assert!(parse_section_header(&chars("[A]:[]")).is_none());
        assert!(parse_section_header(&chars("[A\"\"\"]")).is_none());
        assert!(parse_section_header(&chars("Key=[A]")).is_none());
    }
}
