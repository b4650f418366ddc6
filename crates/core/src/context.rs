//! The cursor over one input line shared by a suggestion or execution walk.

use indexmap::IndexMap;

use crate::registry::Invocation;

/// A tokenized input line plus the state accumulated while walking the
/// grammar tree.
///
/// Tokens are the line split on single ASCII spaces, so `"a  b"` yields an
/// empty middle token and `""` yields one empty token.
#[derive(Debug, Clone)]
pub struct GrammarContext {
    text: String,
    tokens: Vec<String>,
    index: usize,
    params: IndexMap<String, String>,
    ignore_case: bool,
    languages: Vec<String>,
}

impl GrammarContext {
    pub fn new(text: &str, ignore_case: bool, languages: Vec<String>) -> Self {
        Self {
            text: text.to_string(),
            tokens: text.split(' ').map(ToString::to_string).collect(),
            index: 0,
            params: IndexMap::new(),
            ignore_case,
            languages,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The token under the cursor.
    #[must_use]
    pub fn current(&self) -> &str {
        self.tokens.get(self.index).map_or("", String::as_str)
    }

    /// The token right before the cursor, the one that led into the node
    /// being visited.
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        let previous = self.index.checked_sub(1)?;
        self.tokens.get(previous).map(String::as_str)
    }

    /// The word being typed, the target of partial matching.
    #[must_use]
    pub fn last_word(&self) -> &str {
        self.tokens.last().map_or("", String::as_str)
    }

    /// True when the cursor is on the final token.
    #[must_use]
    pub fn end(&self) -> bool {
        self.index + 1 >= self.tokens.len()
    }

    pub fn advance(&mut self) {
        if !self.end() {
            self.index += 1;
        }
    }

    #[must_use]
    pub fn params(&self) -> &IndexMap<String, String> {
        &self.params
    }

    pub(crate) fn set_param(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Tokens up to and including the cursor, as typed.
    #[must_use]
    pub fn consumed_path(&self) -> String {
        let end = (self.index + 1).min(self.tokens.len());
        self.tokens[..end].join(" ")
    }

    pub fn invocation(&self) -> Invocation<'_> {
        Invocation {
            params: &self.params,
            text: &self.text,
            languages: &self.languages,
        }
    }
}
