//! Handlers and injectors the `tsh` binary registers before building the tree.
//!
//! Config files refer to them by name: `handler: version`, `handler: echo`,
//! `handler: env` and `examples: env_vars`.

use std::env;

use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use treeshell_core::command_definitions::ApplicationConfig;
use treeshell_core::error::{Error, Result};
use treeshell_core::grammar::Suggestion;
use treeshell_core::registry::Registry;

pub const VERSION_HANDLER: &str = "version";
pub const ECHO_HANDLER: &str = "echo";
pub const ENV_HANDLER: &str = "env";
pub const ENV_VARS_INJECTOR: &str = "env_vars";

/// Param the `env` handler reads the variable name from
pub const ENV_NAME_PARAM: &str = "name";

/// Registers the built-in demo handlers and injectors.
///
/// # Errors
///
/// Returns an error if `registry` is already sealed.
pub fn register(registry: &mut Registry, config: &ApplicationConfig) -> Result<()> {
    let banner = banner(config);
    registry.register_handler(VERSION_HANDLER, move |_| {
        println!("{banner}");
        Ok(())
    })?;

    registry.register_handler(ECHO_HANDLER, |invocation| {
        println!("{}", format_params(invocation.params));
        Ok(())
    })?;

    registry.register_handler(ENV_HANDLER, |invocation| {
        let name = invocation
            .params
            .get(ENV_NAME_PARAM)
            .ok_or_else(|| Error::Misc(format!("`{ENV_NAME_PARAM}` was not given")))?;
        match env::var(name) {
            Ok(value) => println!("{name}={value}"),
            Err(_) => println!("{name} is not set"),
        }
        Ok(())
    })?;

    registry.register_injector(ENV_VARS_INJECTOR, |ctx| {
        env_var_suggestions(env::vars().map(|(name, _)| name), ctx.last_word())
    })?;

    debug!("Registered demo handlers");
    Ok(())
}

/// Version, copyright and release date, skipping the ones not configured.
#[must_use]
pub fn banner(config: &ApplicationConfig) -> String {
    let version = if config.version.is_empty() {
        String::new()
    } else {
        format!("treeshell {}", config.version)
    };

    let banner = [version.as_str(), config.copyright.as_str(), config.released_at.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .join(" ");
    banner
}

/// Captured params as `key=value` pairs in capture order.
#[must_use]
pub fn format_params(params: &IndexMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .join(" ")
}

/// Sorted suggestions for the variable names starting with `word`.
pub fn env_var_suggestions<I>(names: I, word: &str) -> Vec<Suggestion>
where
    I: IntoIterator<Item = String>,
{
    names
        .into_iter()
        .filter(|name| name.starts_with(word))
        .sorted()
        .dedup()
        .map(|name| Suggestion::new(name, "environment variable"))
        .collect()
}
