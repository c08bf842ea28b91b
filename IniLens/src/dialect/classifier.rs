//! Per-line classification
//!
//! A single left-to-right cursor pass over the characters of one line. Spans
//! are pushed into a [`SpanSink`]; the tokenizer collects them, while state
//! replay uses a sink that drops them so both paths share every rule.
//!
//! Outside a multi-line value the rules are tried in order:
//!
//! 1. `[Name]:[Base]` or `[Name]` header (a trailing comment is allowed)
//! 2. `Key.Part=value` pair
//! 3. anything else, where only comments and triple-quoted runs are tagged
//!
//! Inside a multi-line value everything up to the closing `"""` belongs to the
//! value and `;` is ordinary text. Whatever follows a same-line close is lexed
//! as value continuation.

use super::section::parse_section_header;
use super::{ParseState, Token, TokenKind};

/// Tokens of one line plus the state the next line starts in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub tokens: Vec<Token>,
    pub end_state: ParseState,
}

/// Classify one line, starting from `state`
#[must_use]
pub fn classify_line(line: usize, text: &str, state: ParseState) -> ClassifiedLine {
    let chars: Vec<char> = text.chars().collect();
    let mut sink = TokenSink {
        line,
        tokens: Vec::new(),
    };
    let end_state = lex_line(&chars, state, &mut sink);
    ClassifiedLine {
        tokens: sink.tokens,
        end_state,
    }
}

/// State after `text`, without building tokens
#[must_use]
pub fn next_state(text: &str, state: ParseState) -> ParseState {
    if !text.contains('"') {
        return state;
    }
    let chars: Vec<char> = text.chars().collect();
    lex_line(&chars, state, &mut NullSink)
}

trait SpanSink {
    fn span(&mut self, start: usize, end: usize, kind: TokenKind);
}

struct TokenSink {
    line: usize,
    tokens: Vec<Token>,
}

impl SpanSink for TokenSink {
    fn span(&mut self, start: usize, end: usize, kind: TokenKind) {
        if end > start {
            self.tokens.push(Token::new(self.line, start, end - start, kind));
        }
    }
}

struct NullSink;

impl SpanSink for NullSink {
    fn span(&mut self, _start: usize, _end: usize, _kind: TokenKind) {}
}

fn lex_line<S: SpanSink>(chars: &[char], state: ParseState, sink: &mut S) -> ParseState {
    if state.in_multiline_string {
        if let Some(close) = find_marker(chars, 0) {
            sink.span(0, close + 3, TokenKind::ValueMultilineString);
            return lex_value(chars, close + 3, false, sink);
        }
        sink.span(0, chars.len(), TokenKind::ValueMultilineString);
        return state;
    }

    let comment = chars.iter().position(|&c| c == ';');
    let code_end = comment.unwrap_or(chars.len());

    if let Some(header) = parse_section_header(&chars[..code_end]) {
        sink.span(header.open, header.open + 1, TokenKind::SectionBracket);
        sink.span(header.name.start, header.name.end, TokenKind::SectionContent);
        if let (Some(bridge), Some(base)) = (header.bridge, header.base) {
            sink.span(bridge.start, bridge.end, TokenKind::SectionInherit);
            sink.span(base.start, base.end, TokenKind::SectionInherit);
        }
        sink.span(header.close, header.close + 1, TokenKind::SectionBracket);
        if let Some(start) = comment {
            sink.span(start, chars.len(), TokenKind::Comment);
        }
        return ParseState::INITIAL;
    }

    if let Some(eq) = key_operator(&chars[..code_end]) {
        emit_key_parts(chars, eq, sink);
        sink.span(eq, eq + 1, TokenKind::Operator);
        return lex_value(chars, eq + 1, false, sink);
    }

    lex_value(chars, 0, true, sink)
}

/// Column of the `=` when the text before it is a usable key
fn key_operator(code: &[char]) -> Option<usize> {
    let eq = code.iter().position(|&c| c == '=')?;
    let key = &code[..eq];
    if key.iter().all(|c| c.is_whitespace()) || key.contains(&'"') {
        return None;
    }
    Some(eq)
}

fn emit_key_parts<S: SpanSink>(chars: &[char], eq: usize, sink: &mut S) {
    let mut part_start = 0;
    for (index, part) in chars[..eq].split(|&c| c == '.').enumerate() {
        let part_end = part_start + part.len();
        if let Some((start, end)) = trim_span(chars, part_start, part_end) {
            sink.span(start, end, TokenKind::key_part(index));
        }
        part_start = part_end + 1;
    }
}

/// Lex value text from `from` to end of line
///
/// With `bare` set, plain runs, quoted strings and commas are not tagged; only
/// comments and triple-quoted runs are.
fn lex_value<S: SpanSink>(chars: &[char], from: usize, bare: bool, sink: &mut S) -> ParseState {
    let len = chars.len();
    let mut i = from;
    let mut run_start = from;

    while i < len {
        if is_marker_at(chars, i) {
            flush_plain(chars, run_start, i, bare, sink);
            if let Some(close) = find_marker(chars, i + 3) {
                sink.span(i, close + 3, TokenKind::ValueMultilineString);
                i = close + 3;
                run_start = i;
                continue;
            }
            sink.span(i, len, TokenKind::ValueMultilineString);
            return ParseState::multiline(true);
        }

        match chars[i] {
            ';' => {
                flush_plain(chars, run_start, i, bare, sink);
                sink.span(i, len, TokenKind::Comment);
                return ParseState::INITIAL;
            }
            '"' if !bare => {
                if let Some(close) = closing_quote(chars, i + 1) {
                    flush_plain(chars, run_start, i, bare, sink);
                    sink.span(i, close + 1, TokenKind::ValueString);
                    i = close + 1;
                    run_start = i;
                } else {
                    i += 1;
                }
            }
            ',' if !bare => {
                flush_plain(chars, run_start, i, bare, sink);
                sink.span(i, i + 1, TokenKind::ValueComma);
                i += 1;
                run_start = i;
            }
            _ => i += 1,
        }
    }

    flush_plain(chars, run_start, len, bare, sink);
    ParseState::INITIAL
}

fn flush_plain<S: SpanSink>(chars: &[char], start: usize, end: usize, bare: bool, sink: &mut S) {
    if bare {
        return;
    }
    if let Some((start, end)) = trim_span(chars, start, end) {
        sink.span(start, end, TokenKind::Value);
    }
}

/// Closing `"` of a short string starting before `from`
///
/// The string ends at the next quote unless a comment intervenes or that quote
/// begins a triple-quote marker.
fn closing_quote(chars: &[char], from: usize) -> Option<usize> {
    for (offset, &c) in chars[from..].iter().enumerate() {
        match c {
            ';' => return None,
            '"' => {
                let at = from + offset;
                return (!is_marker_at(chars, at)).then_some(at);
            }
            _ => {}
        }
    }
    None
}

fn is_marker_at(chars: &[char], i: usize) -> bool {
    chars.len() >= i + 3 && chars[i] == '"' && chars[i + 1] == '"' && chars[i + 2] == '"'
}

fn find_marker(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len()).find(|&i| is_marker_at(chars, i))
}

fn trim_span(chars: &[char], mut start: usize, mut end: usize) -> Option<(usize, usize)> {
    while start < end && chars[start].is_whitespace() {
        start += 1;
    }
    while end > start && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    (end > start).then_some((start, end))
}
