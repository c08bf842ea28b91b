//! Token dump for dialect files

use std::path::Path;

use anyhow::Context;
use inilens::dialect::{LineDocument, NeverCancel, TextDocument, tokenize_full, tokenize_range};

pub fn execute(
    path: &Path,
    start: Option<usize>,
    end: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let doc = LineDocument::from_text(&text);

    let tokens = if start.is_none() && end.is_none() {
        tokenize_full(&doc, &NeverCancel)
    } else {
        tokenize_range(
            &doc,
            start.unwrap_or(0),
            end.unwrap_or(usize::MAX),
            &NeverCancel,
        )
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    for token in &tokens {
        let covered: String = doc
            .line(token.line)
            .chars()
            .skip(token.start_column)
            .take(token.length)
            .collect();
        println!(
            "{:>5}:{:<4} {:<22} {}",
            token.line,
            token.start_column,
            token.kind.legend_name(),
            covered
        );
    }

    Ok(())
}
