//! `[#include]` discovery
//!
//! Mods split their rules over several files and list the extra files in an
//! `[#include]` section, either as `1=rulesmd_extra.ini` or as a bare
//! `rulesmd_extra.ini` line.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use super::ParseState;
use super::classifier::next_state;
use super::section::parse_section_header;
use crate::formats::strip_bom;

/// Name of the section that lists included files
pub const INCLUDE_SECTION: &str = "#include";

/// File names listed by every `[#include]` section of `text`, in order
#[must_use]
pub fn parse_includes(text: &str) -> Vec<String> {
    let text = strip_bom(text);
    let mut files = Vec::new();
    let mut state = ParseState::INITIAL;
    let mut in_include = false;

    for line in text.lines() {
        let inside_value = state.in_multiline_string;
        state = next_state(line, state);
        if inside_value || state.in_multiline_string {
            continue;
        }

        let code = line.split(';').next().unwrap_or_default().trim();
        if code.is_empty() {
            continue;
        }

        let chars: Vec<char> = code.chars().collect();
        if let Some(header) = parse_section_header(&chars) {
            in_include = header
                .name_text(&chars)
                .trim()
                .eq_ignore_ascii_case(INCLUDE_SECTION);
            continue;
        }

        if !in_include {
            continue;
        }

        let name = code.split_once('=').map_or(code, |(_, value)| value.trim());
        if !name.is_empty() {
            files.push(name.to_string());
        }
    }

    files
}

/// Walk the include graph starting at `root`
///
/// Included names resolve against the root file's directory. Each file is read
/// once (names compare case-insensitively); unreadable files are logged and
/// skipped. Returns the readable files in discovery order, root first.
pub fn collect_include_closure<F>(root: &Path, mut read: F) -> Vec<PathBuf>
where
    F: FnMut(&Path) -> std::io::Result<String>,
{
    let base_dir = root.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([root.to_path_buf()]);
    let mut found = Vec::new();

    visited.insert(visit_key(root));

    while let Some(path) = queue.pop_front() {
        let text = match read(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Skipping include {}: {}", path.display(), e);
                continue;
            }
        };

        for name in parse_includes(&text) {
            let next = base_dir.join(&name);
            if visited.insert(visit_key(&next)) {
                queue.push_back(next);
            }
        }

        found.push(path);
    }

    tracing::debug!("Include closure of {} has {} files", root.display(), found.len());
    found
}

fn visit_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}
