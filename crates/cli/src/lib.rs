//! Treeshell CLI Library
//!
//! This crate provides the `tsh` binary: an interactive shell whose commands
//! come from a grammar config file. Suggestions for the word being typed are
//! shown under the prompt, and a finished line is dispatched to the handler
//! bound to the matching command.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`handlers`]: Handlers and injectors the binary registers
//! - [`prompt`]: Raw-mode and plain line readers
//! - [`tree`]: Text rendering of the grammar tree
//!
//! # Examples
//!
//! ```bash
//! # Interactive shell
//! tsh
//!
//! # Run a single line and exit
//! tsh help version
//!
//! # Chinese descriptions, custom config
//! tsh -l zh-CN -c ./demos/commands.yml
//!
//! # Show the grammar tree
//! tsh --print-tree
//! ```

pub mod cli_args;
pub mod handlers;
pub mod prompt;
pub mod tree;
