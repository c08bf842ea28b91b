//! Description file parsing
//!
//! Description files use the dialect's own syntax. Each key documents the key
//! of the same name in the section of the same name:
//!
//! ```text
//! [Soldier]
//! Strength="""
//! Hit points of the unit.
//!
//! Values above 500 make it **very** hard to kill.
//! """
//!
//! [E1]:[Soldier]
//! Weapons=Weapons carried, primary first
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use crate::dialect::{TRIPLE_QUOTE, parse_section_header};
use crate::formats::strip_bom;

/// Documented keys of one section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DescriptionSection {
    /// Key -> markdown text
    pub properties: IndexMap<String, String>,
    /// Section this one inherits from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

/// Section name -> documentation, for one language
pub type LanguageDictionary = IndexMap<String, DescriptionSection>;

/// A triple-quoted value still waiting for its closing marker
struct OpenValue {
    key: String,
    fragments: Vec<String>,
}

/// Parse a description file
///
/// Keys before the first section header are ignored. A value left open at the
/// end of the input keeps the lines read so far. Text following a closing
/// `"""` on the same line is discarded. A leading byte-order mark is skipped.
#[must_use]
pub fn parse_descriptions(text: &str) -> LanguageDictionary {
    let text = strip_bom(text);
    let mut sections = LanguageDictionary::new();
    let mut current: Option<String> = None;
    let mut open: Option<OpenValue> = None;

    for raw in text.lines() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if let Some(mut value) = open.take() {
            if let Some(close) = line.find(TRIPLE_QUOTE) {
                push_fragment(&mut value.fragments, &line[..close]);
                store(&mut sections, current.as_deref(), value);
            } else {
                value.fragments.push(line.to_string());
                open = Some(value);
            }
            continue;
        }

        let Some(eq) = key_separator(line) else {
            let code = line.split(';').next().unwrap_or_default();
            let chars: Vec<char> = code.chars().collect();
            if let Some(header) = parse_section_header(&chars) {
                let name = header.name_text(&chars).trim().to_string();
                let section = sections.entry(name.clone()).or_default();
                if let Some(base) = header.base_text(&chars) {
                    section.base = Some(base.trim().to_string());
                }
                current = Some(name);
            }
            continue;
        };

        let key = line[..eq].trim();
        let rest = line[eq + 1..].trim_start();

        if let Some(body) = rest.strip_prefix(TRIPLE_QUOTE) {
            let mut value = OpenValue {
                key: key.to_string(),
                fragments: Vec::new(),
            };
            if let Some(close) = body.find(TRIPLE_QUOTE) {
                push_fragment(&mut value.fragments, &body[..close]);
                store(&mut sections, current.as_deref(), value);
            } else {
                push_fragment(&mut value.fragments, body);
                open = Some(value);
            }
        } else {
            let plain = rest.split(';').next().unwrap_or_default().trim();
            let value = OpenValue {
                key: key.to_string(),
                fragments: vec![plain.to_string()],
            };
            store(&mut sections, current.as_deref(), value);
        }
    }

    if let Some(value) = open {
        store(&mut sections, current.as_deref(), value);
    }

    sections
}

/// Byte offset of the `=` in a `key=value` line
///
/// The key must be non-blank and come before any `;`.
fn key_separator(line: &str) -> Option<usize> {
    let eq = line.find('=')?;
    let key = &line[..eq];
    (!key.contains(';') && !key.trim().is_empty()).then_some(eq)
}

/// Keep marker-line fragments only when they hold text
fn push_fragment(fragments: &mut Vec<String>, fragment: &str) {
    if !fragment.trim().is_empty() {
        fragments.push(fragment.to_string());
    }
}

fn store(sections: &mut LanguageDictionary, section: Option<&str>, value: OpenValue) {
    let Some(section) = section else {
        tracing::debug!("Ignoring description for {} outside any section", value.key);
        return;
    };
    if let Some(entry) = sections.get_mut(section) {
        entry.properties.insert(value.key, value.fragments.join("\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn property<'a>(dict: &'a LanguageDictionary, section: &str, key: &str) -> Option<&'a str> {
        dict.get(section)?.properties.get(key).map(String::as_str)
    }

    #[test]
    fn test_sections_bases_and_plain_values() {
        let dict = parse_descriptions(
            "Orphan=ignored\n; header comment\n[Soldier]\nStrength=Hit points ; trailing\n\n[E1]:[Soldier]\nWeapons = Rifle first\n",
        );

        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["Soldier", "E1"]);
        assert_eq!(property(&dict, "Soldier", "Strength"), Some("Hit points"));
        assert_eq!(property(&dict, "E1", "Weapons"), Some("Rifle first"));
        assert_eq!(dict["E1"].base.as_deref(), Some("Soldier"));
        assert_eq!(dict["Soldier"].base, None);
        assert!(dict.values().all(|s| !s.properties.contains_key("Orphan")));
    }

    #[test]
    fn test_multiline_values() {
        let text = "[Unit]\nSpeed=\"\"\"\nCells per tick.\n\n; not a comment\nSee *Rules*.\"\"\" dropped\nCost=\"\"\"Credits\"\"\"\nArmor=\"\"\"first\nsecond\n\"\"\"\n";
        let dict = parse_descriptions(text);

        assert_eq!(
            property(&dict, "Unit", "Speed"),
            Some("Cells per tick.\n\n; not a comment\nSee *Rules*.")
        );
        assert_eq!(property(&dict, "Unit", "Cost"), Some("Credits"));
        assert_eq!(property(&dict, "Unit", "Armor"), Some("first\nsecond"));
    }

    #[test]
    fn test_unterminated_value_is_flushed() {
        let dict = parse_descriptions("[Unit]\nNote=\"\"\"\nline one\nline two");
        assert_eq!(property(&dict, "Unit", "Note"), Some("line one\nline two"));
    }

    #[test]
    fn test_repeated_sections_accumulate() {
        let dict = parse_descriptions("[A]:[X]\nOne=1\n[B]\n[A]\nTwo=2\n[A]:[Y]\n");

        assert_eq!(dict.len(), 2);
        assert_eq!(property(&dict, "A", "One"), Some("1"));
        assert_eq!(property(&dict, "A", "Two"), Some("2"));
        assert_eq!(dict["A"].base.as_deref(), Some("Y"));
    }

    #[test]
    fn test_header_inside_value_is_text() {
        let dict = parse_descriptions("[A]\nK=\"\"\"\n[B]\n\"\"\"\nL=2\n");
        assert_eq!(dict.len(), 1);
        assert_eq!(property(&dict, "A", "K"), Some("[B]"));
        assert_eq!(property(&dict, "A", "L"), Some("2"));
    }

    #[test]
    fn test_leading_bom_is_skipped() {
        let dict = parse_descriptions("\u{feff}[Soldier]\nStrength=Hit points\n");
        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["Soldier"]);
        assert_eq!(property(&dict, "Soldier", "Strength"), Some("Hit points"));
    }
}
