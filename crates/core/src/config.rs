//! Configuration path and language utilities for treeshell.
//!
//! This module resolves the configuration file path, expanding shell
//! variables like `~`, and decides which languages localized text is looked
//! up in.

use std::env;

/// Default path for the grammar configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.treeshell/commands.yml";

/// Language used when nothing else is configured, and the second choice
/// whenever the language comes from the environment
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Prompt shown when the configuration does not set `cli_prefix`
pub const DEFAULT_CLI_PREFIX: &str = "> ";

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Arguments
///
/// * `config_path_arg` - Optional custom configuration file path
///
/// # Examples
///
/// ```
/// use treeshell_core::config::get_config_path;
///
/// let default_path = get_config_path(&None);
/// let custom_path = get_config_path(&Some("/path/to/commands.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/commands.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Turns a POSIX locale such as `zh_CN.UTF-8` into a language tag (`zh-CN`).
///
/// Returns None for an empty value.
pub fn locale_to_language(locale: &str) -> Option<String> {
    let without_encoding = locale.split('.').next().unwrap_or_default();
    if without_encoding.is_empty() {
        return None;
    }

    Some(without_encoding.replace('_', "-"))
}

/// Decides the ordered list of languages used for every localized lookup.
///
/// Precedence: the configured preferred language on its own, then `LANG`,
/// then `LC_ALL`, and finally [`DEFAULT_LANGUAGE`]. A language taken from the
/// environment is followed by [`DEFAULT_LANGUAGE`].
///
/// # Arguments
///
/// * `preferred_language` - Language from the configuration or command line
/// * `lookup` - Reads an environment variable by name
pub fn resolve_languages<F>(preferred_language: Option<&str>, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(preferred) = preferred_language.filter(|language| !language.is_empty()) {
        return vec![preferred.to_string()];
    }

    for variable in ["LANG", "LC_ALL"] {
        if let Some(language) = lookup(variable).as_deref().and_then(locale_to_language) {
            return vec![language, DEFAULT_LANGUAGE.to_string()];
        }
    }

    vec![DEFAULT_LANGUAGE.to_string()]
}

/// [`resolve_languages`] against the process environment.
pub fn languages_from_environment(preferred_language: Option<&str>) -> Vec<String> {
    resolve_languages(preferred_language, |variable| env::var(variable).ok())
}
