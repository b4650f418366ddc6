//! Treeshell Core Library
//!
//! This crate provides the command-grammar engine behind treeshell: a tree of
//! literal commands and wildcard options, built once from configuration, that
//! both suggests completions for a partially typed line and dispatches a
//! finished line to the handler bound to it.
//!
//! # Key Features
//!
//! - **Command Definitions**: Parse and validate YAML-based grammar configurations
//! - **Grammar Tree**: Token-by-token prefix matching with a fixed tie-break
//! - **Suggestions**: Localized completions, static or computed by injectors
//! - **Dispatch**: Handlers receive captured option values and the raw line
//! - **Localization**: Ordered language preferences with fallback
//! - **Error Handling**: Comprehensive error types for all failure modes
//!
//! # Examples
//!
//! Building an engine from a configuration file:
//!
//! ```no_run
//! use treeshell_core::config::get_config_path;
//! use treeshell_core::engine::Engine;
//! use treeshell_core::file_handling::get_application_config;
//! use treeshell_core::registry::Registry;
//!
//! let config = get_application_config(&get_config_path(&None))?;
//! let mut registry = Registry::new();
//! registry.register_handler("version", |_| {
//!     println!("0.1.0");
//!     Ok(())
//! })?;
//!
//! let engine = Engine::new(&config, &mut registry);
//! engine.execute_line("help version")?;
//! # Ok::<(), treeshell_core::error::Error>(())
//! ```

pub mod command_definitions;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod file_handling;
pub mod grammar;
pub mod messages;
pub mod registry;
pub mod translation;
