//! Localized display keys and descriptions.

use indexmap::IndexMap;

use crate::command_definitions::DescriptionDefinition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub key: String,
    pub description: String,
}

/// Per-language (display key, description) pairs.
///
/// Lookups walk a preference list and fall back to the entry whose language
/// was inserted first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSet {
    items: IndexMap<String, Translation>,
}

impl TranslationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `(language, key, description)` triples.
    pub fn from_items<I, L, K, D>(items: I) -> Self
    where
        I: IntoIterator<Item = (L, K, D)>,
        L: Into<String>,
        K: Into<String>,
        D: Into<String>,
    {
        let mut set = Self::new();
        set.init(items);
        set
    }

    /// Builds a set from configured descriptions; an entry without a name
    /// displays `fallback_key`.
    #[must_use]
    pub fn from_descriptions(descriptions: &[DescriptionDefinition], fallback_key: &str) -> Self {
        Self::from_items(descriptions.iter().map(|description| {
            (
                description.language.as_str(),
                description.name.as_deref().unwrap_or(fallback_key),
                description.text.as_str(),
            )
        }))
    }

    /// Replaces the content of the set. The last entry per language wins.
    pub fn init<I, L, K, D>(&mut self, items: I)
    where
        I: IntoIterator<Item = (L, K, D)>,
        L: Into<String>,
        K: Into<String>,
        D: Into<String>,
    {
        self.items.clear();
        for (language, key, description) in items {
            self.items.insert(
                language.into(),
                Translation {
                    key: key.into(),
                    description: description.into(),
                },
            );
        }
    }

    /// Returns the translation for the first available preferred language.
    ///
    /// Falls back to the first inserted entry, or `("", "")` when the set is
    /// empty.
    pub fn get_translation<S: AsRef<str>>(&self, preferred_languages: &[S]) -> (&str, &str) {
        let translation = preferred_languages
            .iter()
            .find_map(|language| self.items.get(language.as_ref()))
            .or_else(|| self.items.first().map(|(_, translation)| translation));

        match translation {
            Some(translation) => (&translation.key, &translation.description),
            None => ("", ""),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}
