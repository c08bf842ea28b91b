//! Key documentation lookup

use std::path::Path;

use inilens::description::DescriptionStore;

pub fn execute(dictionary: &Path, language: &str, section: &str, key: &str) -> anyhow::Result<()> {
    let mut store = DescriptionStore::new();
    store.load_from_dictionary(dictionary)?;

    let resolver = store.resolver(language);
    let chain = resolver.inheritance_chain(section);
    if chain.len() > 1 {
        tracing::debug!("Inheritance chain: {}", chain.join(" -> "));
    }

    match resolver.get_description(section, key) {
        Some(text) => println!("{text}"),
        None => println!(
            "No description for [{}] {} in {}",
            section,
            key,
            resolver.language()
        ),
    }

    Ok(())
}
