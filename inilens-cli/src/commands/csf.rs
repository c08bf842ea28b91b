//! CLI commands for string table files

use std::path::Path;

use anyhow::Context;
use inilens::formats::{CsfLanguage, CsfTable, read_csf, read_label_text, write_csf};
use inilens::labels::LabelFileKind;

/// Print every label of a binary or text table
pub fn dump(source: &Path, json: bool) -> anyhow::Result<()> {
    let (language, entries) = match LabelFileKind::from_path(source) {
        LabelFileKind::Binary => {
            let table = read_csf(source)
                .with_context(|| format!("Failed to read {}", source.display()))?;
            (Some(table.language), table.entries)
        }
        LabelFileKind::Text => {
            let entries = read_label_text(source)
                .with_context(|| format!("Failed to read {}", source.display()))?;
            (None, entries)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if let Some(language) = language {
        println!("Language: {} ({})", language.code(), language.id());
    }
    println!("Labels: {}", entries.len());
    println!();

    for entry in &entries {
        let value = entry.value.replace('\n', "\\n");
        match &entry.extra_value {
            Some(extra) => println!("{}: {} [{}]", entry.label, value, extra),
            None => println!("{}: {}", entry.label, value),
        }
    }

    Ok(())
}

/// Convert a text table into a binary one
pub fn build(source: &Path, destination: &Path, language: &str) -> anyhow::Result<()> {
    let Some(language) = CsfLanguage::from_code(language) else {
        anyhow::bail!("Unknown string table language '{language}'");
    };

    let entries = read_label_text(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let count = entries.len();
    write_csf(destination, &CsfTable::new(language, entries))
        .with_context(|| format!("Failed to write {}", destination.display()))?;

    println!(
        "Wrote {} labels to {} ({})",
        count,
        destination.display(),
        language.code()
    );
    Ok(())
}
