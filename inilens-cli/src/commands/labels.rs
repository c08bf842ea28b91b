//! CLI commands for the merged label index

use std::collections::BTreeMap;
use std::path::Path;

use inilens::formats::LabelEntry;
use inilens::labels::{FsLabelSource, SharedLabelIndex, find_label_files};

pub fn execute(
    dir: &Path,
    extensions: &[String],
    lookups: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let files = find_label_files(dir, extensions);
    if files.is_empty() {
        anyhow::bail!(
            "No label files ({}) found under {}",
            extensions.join(", "),
            dir.display()
        );
    }
    tracing::info!("Found {} label files", files.len());

    let index = SharedLabelIndex::new(FsLabelSource);
    index.index_files(&files)?;

    if lookups.is_empty() {
        let stats = index.stats()?;
        if json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!("Files:  {}", stats.files);
            println!("Labels: {}", stats.labels);
        }
        return Ok(());
    }

    let mut found: BTreeMap<&str, Option<LabelEntry>> = BTreeMap::new();
    for label in lookups {
        found.insert(label, index.lookup(label)?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    for (label, entry) in &found {
        match entry {
            Some(entry) => println!("{}: {}", entry.label, entry.value.replace('\n', "\\n")),
            None => println!("{label}: <not found>"),
        }
    }

    Ok(())
}
