//! File handling and validation for treeshell configuration.
//!
//! This module reads the grammar configuration from disk and validates the
//! command names before a tree is built from them.

use std::fs::File;
use std::io::Read;

use indexmap::IndexMap;

use crate::command_definitions::{ApplicationConfig, CommandDefinition};
use crate::error::Error::{EmptyId, IdWithSpace};
use crate::error::{Error, Result};

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

fn validate_name(name: &str, parent_path: &str) -> Result<()> {
    if name.is_empty() {
        let parent = if parent_path.is_empty() {
            "<root>"
        } else {
            parent_path
        };
        return Err(EmptyId(parent.to_string()));
    }

    // Input is split on spaces, so such a name could never be typed
    if name.contains(' ') {
        return Err(IdWithSpace(name.to_string()));
    }

    Ok(())
}

fn validate_commands(
    commands: &IndexMap<String, CommandDefinition>,
    parent_path: &str,
) -> Result<()> {
    for (name, definition) in commands {
        validate_name(name, parent_path)?;

        let path = if parent_path.is_empty() {
            name.clone()
        } else {
            format!("{parent_path} {name}")
        };
        validate_commands(&definition.commands, &path)?;
    }

    Ok(())
}

/// Parses and validates an application configuration from YAML (or JSON).
///
/// # Arguments
///
/// * `content` - The configuration text
/// * `source` - Where the text came from, used in error messages
///
/// # Errors
///
/// Returns an error if:
/// - The text is malformed or doesn't match the expected structure
/// - No commands are configured
/// - A command name is empty or contains a space
pub fn parse_application_config(content: &str, source: &str) -> Result<ApplicationConfig> {
    let config: ApplicationConfig = serde_yaml::from_str(content).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            source.to_string(),
            e,
        )
    })?;

    if config.commands.is_empty() {
        return Err(Error::empty_command_definition(source.to_string()));
    }

    validate_commands(&config.commands, "")?;

    Ok(config)
}

/// Loads and validates the application configuration file.
///
/// # Arguments
///
/// * `config_path` - Path to the YAML configuration file
///
/// # Errors
///
/// Returns an error if the file cannot be read, plus every error of
/// [`parse_application_config`].
///
/// # Examples
///
/// ```no_run
/// use treeshell_core::config::get_config_path;
/// use treeshell_core::file_handling::get_application_config;
///
/// let config = get_application_config(&get_config_path(&None))?;
/// println!("Loaded {} top-level commands", config.commands.len());
/// # Ok::<(), treeshell_core::error::Error>(())
/// ```
pub fn get_application_config(config_path: &str) -> Result<ApplicationConfig> {
    let mut content = String::new();
    get_reader("config", config_path)?
        .read_to_string(&mut content)
        .map_err(|e| Error::io_error("config".to_string(), config_path.to_string(), e))?;

    parse_application_config(&content, config_path)
}
