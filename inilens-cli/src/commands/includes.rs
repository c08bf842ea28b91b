//! `[#include]` closure listing

use std::path::Path;

use inilens::dialect::collect_include_closure;

pub fn execute(root: &Path, json: bool) -> anyhow::Result<()> {
    if !root.is_file() {
        anyhow::bail!("Root file not found: {}", root.display());
    }

    let files = collect_include_closure(root, |path| std::fs::read_to_string(path));

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
    } else {
        for file in &files {
            println!("{}", file.display());
        }
    }

    Ok(())
}
