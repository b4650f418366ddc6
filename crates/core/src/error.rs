use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Handler `{}` bound to command `{}` is not registered.", .handler, .path)]
    HandlerNotFound { path: String, handler: String },

    #[error("Injector `{}` bound to option `{}` is not registered.", .injector, .path)]
    InjectorNotFound { path: String, injector: String },

    #[error("Cannot register `{}`: a grammar tree was already built from this registry.", .0)]
    RegistrySealed(String),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("No commands were found in the configuration. Is `{}` empty?", .path)]
    EmptyCommandDefinition { path: String },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing message template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering message template: {}", .0)]
    Render(#[from] RenderError),

    #[error("Invalid command name under `{}`: name may not be empty", .0)]
    EmptyId(String),

    #[error("Invalid command name `{}`: name may not contain spaces", .0)]
    IdWithSpace(String),

    #[error("Misc error: {}", .0)]
    Misc(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn empty_command_definition(path: String) -> Self {
        Self::EmptyCommandDefinition { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn handler_not_found(path: String, handler: String) -> Self {
        Self::HandlerNotFound { path, handler }
    }

    pub fn injector_not_found(path: String, injector: String) -> Self {
        Self::InjectorNotFound { path, injector }
    }
}
