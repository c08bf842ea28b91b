//! Description lookups with section inheritance and `en-US` fallback

use std::collections::HashSet;

use super::parser::LanguageDictionary;
use super::store::DescriptionStore;
use super::{FALLBACK_LANGUAGE, normalize_language_tag};

/// Answers `(section, key)` lookups in one language
#[derive(Debug, Clone)]
pub struct DescriptionResolver<'a> {
    store: &'a DescriptionStore,
    language: String,
}

impl<'a> DescriptionResolver<'a> {
    #[must_use]
    pub fn new(store: &'a DescriptionStore, language: &str) -> Self {
        Self {
            store,
            language: normalize_language_tag(language),
        }
    }

    /// Selected language tag, normalized
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Documentation of `key` as seen from `section`
    ///
    /// Walks `section` and its bases in the selected language, then in
    /// [`FALLBACK_LANGUAGE`]. The first non-blank value wins. A missing
    /// section, a missing base or a repeated section ends a walk.
    #[must_use]
    pub fn get_description(&self, section: &str, key: &str) -> Option<&'a str> {
        let selected = self
            .store
            .dictionary(&self.language)
            .and_then(|dict| walk(dict, section, key));
        if selected.is_some() || self.language == FALLBACK_LANGUAGE {
            return selected;
        }

        self.store
            .dictionary(FALLBACK_LANGUAGE)
            .and_then(|dict| walk(dict, section, key))
    }

    /// Sections visited from `section` in the selected language, `section` first
    ///
    /// Stops before the first missing or repeated section.
    #[must_use]
    pub fn inheritance_chain(&self, section: &str) -> Vec<&'a str> {
        let Some(dict) = self.store.dictionary(&self.language) else {
            return Vec::new();
        };

        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = dict.get_key_value(section);
        while let Some((name, entry)) = current {
            if !visited.insert(name.as_str()) {
                break;
            }
            chain.push(name.as_str());
            current = entry.base.as_deref().and_then(|base| dict.get_key_value(base));
        }
        chain
    }
}

fn walk<'d>(dict: &'d LanguageDictionary, section: &str, key: &str) -> Option<&'d str> {
    let mut visited = HashSet::new();
    let mut current = dict.get_key_value(section)?;

    loop {
        let (name, entry) = current;
        if !visited.insert(name.as_str()) {
            tracing::debug!("Inheritance cycle at [{}] while resolving {}", name, key);
            return None;
        }

        if let Some(text) = entry.properties.get(key).filter(|text| !text.trim().is_empty()) {
            return Some(text.as_str());
        }

        let base = entry.base.as_deref()?;
        current = dict.get_key_value(base)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ENGLISH: &str = "\
[Infantry]
Strength=Hit points
Speed=Cells per tick

[Soldier]:[Infantry]
Weapons=Weapons carried
Speed=

[E1]:[Soldier]
Cost=Price in credits

[Loop1]:[Loop2]
[Loop2]:[Loop1]

[Dangling]:[Nowhere]
";

    const GERMAN: &str = "\
[Soldier]
Weapons=Getragene Waffen
";

    fn store() -> DescriptionStore {
        let mut store = DescriptionStore::new();
        store.load_language("en-US", ENGLISH);
        store.load_language("de-DE", GERMAN);
        store
    }

    #[test]
    fn test_parent_does_not_see_child_keys() {
        let store = store();
        let resolver = store.resolver("en-US");
        assert_eq!(resolver.get_description("Infantry", "Weapons"), None);
        assert_eq!(resolver.get_description("Soldier", "Cost"), None);
    }

    #[test]
    fn test_two_hop_lookup_and_blank_values() {
        let store = store();
        let resolver = store.resolver("en-US");
        assert_eq!(resolver.get_description("E1", "Strength"), Some("Hit points"));
        assert_eq!(resolver.get_description("E1", "Weapons"), Some("Weapons carried"));
        // Blank child values fall through to the base
        assert_eq!(resolver.get_description("Soldier", "Speed"), Some("Cells per tick"));
        assert_eq!(resolver.inheritance_chain("E1"), vec!["E1", "Soldier", "Infantry"]);
    }

    #[test]
    fn test_cycles_and_dangling_bases_stop() {
        let store = store();
        let resolver = store.resolver("en-US");
        assert_eq!(resolver.get_description("Loop1", "Anything"), None);
        assert_eq!(resolver.get_description("Dangling", "Anything"), None);
        assert_eq!(resolver.get_description("Unknown", "Anything"), None);
        assert_eq!(resolver.inheritance_chain("Loop1"), vec!["Loop1", "Loop2"]);
    }

    #[test]
    fn test_language_fallback() {
        let store = store();
        let german = store.resolver("de_de");
        assert_eq!(german.language(), "de-DE");
        assert_eq!(german.get_description("Soldier", "Weapons"), Some("Getragene Waffen"));
        // German [Soldier] has no base, so the fallback walk answers
        assert_eq!(german.get_description("Soldier", "Strength"), Some("Hit points"));
        assert_eq!(german.get_description("E1", "Cost"), Some("Price in credits"));

        let french = store.resolver("fr-FR");
        assert_eq!(french.get_description("E1", "Cost"), Some("Price in credits"));
    }

    #[test]
    fn test_no_fallback_to_arbitrary_language() {
        let mut store = DescriptionStore::new();
        store.load_language("de-DE", GERMAN);
        let resolver = store.resolver("fr-FR");
        assert_eq!(resolver.get_description("Soldier", "Weapons"), None);
    }
}
