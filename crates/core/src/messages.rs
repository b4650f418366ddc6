//! Built-in localized messages.
//!
//! Each message is a [`TranslationSet`] whose descriptions are `leon`
//! templates, rendered with values such as `{path}` or `{text}` once the
//! language has been picked.

use std::collections::HashMap;

use leon::Template;

use crate::error::Result;
use crate::translation::TranslationSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Suggestion shown when the typed path leads nowhere. Uses `{path}`.
    BadCommand,
    /// Printed when a line does not resolve to a single command. Uses `{text}`.
    NoCommand,
    /// Printed when the matched command has no handler. Uses `{text}`.
    NotImplemented,
}

impl Message {
    fn entries(self) -> &'static [(&'static str, &'static str, &'static str)] {
        match self {
            Message::BadCommand => &[
                ("en-US", "bad command", "no command matches `{path}`"),
                ("zh-CN", "错误的命令", "没有与 `{path}` 匹配的命令"),
            ],
            Message::NoCommand => &[
                ("en-US", "no command", "No such command: `{text}`"),
                ("zh-CN", "无此命令", "没有这个命令: `{text}`"),
            ],
            Message::NotImplemented => &[
                ("en-US", "not implemented", "Command `{text}` is not implemented yet"),
                ("zh-CN", "未实现", "命令 `{text}` 尚未实现"),
            ],
        }
    }

    #[must_use]
    pub fn translations(self) -> TranslationSet {
        TranslationSet::from_items(self.entries().iter().copied())
    }
}

/// Picks the translation of `message` for `languages` and renders its
/// description template with `values`.
///
/// # Errors
///
/// Returns an error if the template cannot be parsed or references a value
/// that was not provided.
pub fn localize<S: AsRef<str>>(
    message: Message,
    languages: &[S],
    values: &HashMap<String, String>,
) -> Result<(String, String)> {
    let translations = message.translations();
    let (key, description) = translations.get_translation(languages);
    let template = Template::parse(description)?;

    Ok((key.to_string(), template.render(values)?))
}
