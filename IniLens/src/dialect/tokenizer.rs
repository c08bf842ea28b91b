//! Full and ranged tokenization over a [`TextDocument`]
//!
//! A ranged scan replays lines `[0, start)` through [`next_state`] to recover
//! the state at `start`, then classifies `[start, end]` exactly as a full scan
//! would. The replay is linear in `start`; callers that need constant-time
//! range updates must cache per-line states themselves.

use super::classifier::{classify_line, next_state};
use super::{Cancellation, ParseState, TextDocument, Token};

/// Tokenize every line of `document`
///
/// Cancellation is polled before each line. A cancelled scan returns the
/// tokens produced so far.
pub fn tokenize_full<D, C>(document: &D, cancel: &C) -> Vec<Token>
where
    D: TextDocument + ?Sized,
    C: Cancellation + ?Sized,
{
    let line_count = document.line_count();
    if line_count == 0 {
        return Vec::new();
    }
    scan(document, 0, line_count - 1, ParseState::INITIAL, cancel)
}

/// Tokenize lines `start_line..=end_line`
///
/// `end_line` is clamped to the last line. An empty range, or one starting past
/// the end of the document, yields no tokens.
pub fn tokenize_range<D, C>(
    document: &D,
    start_line: usize,
    end_line: usize,
    cancel: &C,
) -> Vec<Token>
where
    D: TextDocument + ?Sized,
    C: Cancellation + ?Sized,
{
    let line_count = document.line_count();
    if start_line >= line_count || start_line > end_line {
        return Vec::new();
    }
    let end_line = end_line.min(line_count - 1);

    let mut state = ParseState::INITIAL;
    for line in 0..start_line {
        if cancel.is_cancelled() {
            tracing::debug!("Range tokenize cancelled while replaying line {}", line);
            return Vec::new();
        }
        state = next_state(document.line(line), state);
    }

    scan(document, start_line, end_line, state, cancel)
}

/// Parse state in effect at the start of `line`
pub fn state_at<D: TextDocument + ?Sized>(document: &D, line: usize) -> ParseState {
    (0..line.min(document.line_count()))
        .fold(ParseState::INITIAL, |state, i| next_state(document.line(i), state))
}

fn scan<D, C>(
    document: &D,
    start_line: usize,
    end_line: usize,
    mut state: ParseState,
    cancel: &C,
) -> Vec<Token>
where
    D: TextDocument + ?Sized,
    C: Cancellation + ?Sized,
{
    let mut tokens = Vec::new();
    for line in start_line..=end_line {
        if cancel.is_cancelled() {
            tracing::debug!(
                "Tokenize cancelled at line {} with {} tokens",
                line,
                tokens.len()
            );
            break;
        }
        let classified = classify_line(line, document.line(line), state);
        tokens.extend(classified.tokens);
        state = classified.end_state;
    }
    tokens
}
