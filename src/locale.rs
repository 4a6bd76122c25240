//! Locale-aware character folding for the literal-match branch.
//!
//! Folding maps accented letters of a locale onto plain ASCII so that a regex match
//! against the raw column text finds `cicek` when the user typed `Çiçek`. It is applied
//! only to the literal pattern; the linguistic branch hands the keyword to PostgreSQL
//! untouched, because the text search configuration normalizes it there.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static DEFAULT_REGISTRY: Lazy<LocaleRegistry> = Lazy::new(LocaleRegistry::default);

const TURKISH: [(char, char); 12] = [
    ('ç', 'c'),
    ('Ç', 'C'),
    ('ğ', 'g'),
    ('Ğ', 'G'),
    ('ı', 'i'),
    ('İ', 'I'),
    ('ö', 'o'),
    ('Ö', 'O'),
    ('ş', 's'),
    ('Ş', 'S'),
    ('ü', 'u'),
    ('Ü', 'U'),
];

/// Character substitution table for one locale
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldingTable {
    map: HashMap<char, char>,
}

impl FoldingTable {
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, char)>,
    {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    pub fn turkish() -> Self {
        Self::new(TURKISH)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn fold(&self, text: &str) -> String {
        text.chars()
            .map(|c| self.map.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

/// Locale tag → folding table
///
/// Tags are matched case-insensitively. Locales without a table fold to the identity.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    tables: HashMap<String, FoldingTable>,
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("turkish", FoldingTable::turkish());
        registry
    }
}

impl LocaleRegistry {
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Register (or replace) the folding table for `locale`
    pub fn register(&mut self, locale: &str, table: FoldingTable) -> &mut Self {
        self.tables.insert(locale.to_lowercase(), table);
        self
    }

    pub fn table(&self, locale: &str) -> Option<&FoldingTable> {
        self.tables.get(&locale.to_lowercase())
    }

    pub fn is_folding_locale(&self, locale: &str) -> bool {
        self.table(locale).is_some()
    }

    pub fn fold(&self, text: &str, locale: &str) -> String {
        match self.table(locale) {
            Some(table) => table.fold(text),
            None => text.to_string(),
        }
    }
}

pub(crate) fn default_registry() -> &'static LocaleRegistry {
    &DEFAULT_REGISTRY
}

/// Fold `text` with the built-in registry
pub fn fold(text: &str, locale: &str) -> String {
    DEFAULT_REGISTRY.fold(text, locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_turkish_table_has_twelve_entries() {
        assert_eq!(FoldingTable::turkish().len(), 12);
    }

    #[test]
    fn test_turkish_fold() {
        assert_eq!(fold("Çiçek", "turkish"), "Cicek");
        assert_eq!(fold("ığdır İŞÜ", "turkish"), "igdir ISU");
        assert_eq!(fold("Göğüs", "Turkish"), "Gogus");
    }

    #[test]
    fn test_other_locales_pass_through() {
        assert_eq!(fold("Çiçek", "english"), "Çiçek");
        assert_eq!(fold("", "turkish"), "");
    }

    #[test]
    fn test_registered_locale() {
        let mut registry = LocaleRegistry::default();
        registry.register("german", FoldingTable::new([('ä', 'a'), ('ß', 's')]));
        assert!(registry.is_folding_locale("GERMAN"));
        assert_eq!(registry.fold("Straße ändern", "german"), "Strase andern");
        assert_eq!(registry.fold("Çiçek", "german"), "Çiçek");
    }

    #[test]
    fn test_empty_registry_is_identity() {
        let registry = LocaleRegistry::empty();
        assert_eq!(registry.fold("Çiçek", "turkish"), "Çiçek");
    }

    proptest! {
        #[test]
        fn fold_is_idempotent(s in "\\PC*") {
            let once = fold(&s, "turkish");
            prop_assert_eq!(fold(&once, "turkish"), once);
        }

        #[test]
        fn fold_is_identity_for_english(s in "\\PC*") {
            prop_assert_eq!(fold(&s, "english"), s);
        }

        #[test]
        fn fold_preserves_char_count(s in "\\PC*") {
            prop_assert_eq!(fold(&s, "turkish").chars().count(), s.chars().count());
        }
    }
}
