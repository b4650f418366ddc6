//! The engine ties a built grammar tree to a front-end.
//!
//! # Examples
//!
//! ```
//! use treeshell_core::command_definitions::ApplicationConfig;
//! use treeshell_core::engine::Engine;
//! use treeshell_core::registry::Registry;
//!
//! let config: ApplicationConfig = serde_yaml::from_str(
//!     "preferred_language: en-US\ncommands:\n  help:\n    commands:\n      version: {handler: v}\n",
//! ).unwrap();
//!
//! let mut registry = Registry::new();
//! registry.register_handler("v", |_| Ok(())).unwrap();
//!
//! let engine = Engine::new(&config, &mut registry);
//! let completion = engine.matcher("help vers");
//! assert_eq!(completion.suggestions[0].text, "version");
//! assert_eq!((completion.start, completion.end), (5, 9));
//! ```

use std::io::{stderr, Write};

use log::{debug, error, info, warn};

use crate::command_definitions::ApplicationConfig;
use crate::config::languages_from_environment;
use crate::context::GrammarContext;
use crate::error::{Error, Result};
use crate::grammar::{GrammarNode, Suggestion, TreeBuilder};
use crate::registry::{Fallbacks, Registry};

/// Suggestions for a line, plus the byte range of the word they replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub suggestions: Vec<Suggestion>,
    pub start: usize,
    pub end: usize,
}

/// Produces completions for a partially typed line.
pub trait Completer {
    fn complete(&self, text: &str) -> Completion;
}

/// A front-end that hands over one line of input at a time.
pub trait LineReader {
    /// Blocks until a line is entered. Returns `None` once input is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read from or written to.
    fn read_line(&mut self, prefix: &str, completer: &dyn Completer) -> Result<Option<String>>;
}

pub struct Engine {
    root: GrammarNode,
    fallbacks: Fallbacks,
    ignore_case: bool,
    languages: Vec<String>,
    prefix: String,
    init_errors: Vec<Error>,
}

impl Engine {
    /// Builds the grammar tree for `config` and seals `registry`.
    ///
    /// Handler and injector names missing from the registry do not fail the
    /// build; they are logged, printed when `debug` is set, and available
    /// from [`Engine::init_errors`].
    pub fn new(config: &ApplicationConfig, registry: &mut Registry) -> Self {
        let languages = languages_from_environment(config.preferred_language.as_deref());
        Self::with_languages(config, registry, languages)
    }

    /// Like [`Engine::new`], with an explicit language preference list.
    pub fn with_languages(
        config: &ApplicationConfig,
        registry: &mut Registry,
        languages: Vec<String>,
    ) -> Self {
        debug!("Building grammar tree with languages {languages:?}");

        if registry.is_sealed() {
            warn!("Registry was already sealed by an earlier engine, reusing its bindings");
        }

        let (root, init_errors) = TreeBuilder::new(registry).build(&config.commands);
        registry.seal();

        report_init_errors(&init_errors, config.debug, &mut stderr());

        Self {
            root,
            fallbacks: registry.fallbacks().clone(),
            ignore_case: config.ignore_case(),
            languages,
            prefix: config.prompt_prefix().to_string(),
            init_errors,
        }
    }

    #[must_use]
    pub fn root(&self) -> &GrammarNode {
        &self.root
    }

    #[must_use]
    pub fn init_errors(&self) -> &[Error] {
        &self.init_errors
    }

    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn context(&self, text: &str) -> GrammarContext {
        GrammarContext::new(text, self.ignore_case, self.languages.clone())
    }

    /// Suggestions for `text` and the range of the word being typed, so the
    /// chosen suggestion can be spliced in place of it.
    #[must_use]
    pub fn matcher(&self, text: &str) -> Completion {
        let mut ctx = self.context(text);
        let suggestions = self.root.index_suggestions(&mut ctx);
        let end = text.len();

        Completion {
            suggestions,
            start: end - ctx.last_word().len(),
            end,
        }
    }

    /// Runs one line through the tree.
    ///
    /// # Errors
    ///
    /// Returns the error of the handler the line was dispatched to.
    pub fn execute_line(&self, text: &str) -> Result<()> {
        debug!("Executing `{text}`");
        self.root.execute(&mut self.context(text), &self.fallbacks)
    }

    /// Reads and executes lines until `reader` runs out of input.
    ///
    /// Blank lines are skipped. A failing handler is reported and the loop
    /// carries on.
    ///
    /// # Errors
    ///
    /// Returns an error if `reader` fails.
    pub fn execute(&self, reader: &mut dyn LineReader) -> Result<()> {
        loop {
            let Some(line) = reader.read_line(&self.prefix, self)? else {
                info!("Input closed, leaving the shell");
                return Ok(());
            };

            if line.trim().is_empty() {
                continue;
            }

            if let Err(e) = self.execute_line(&line) {
                error!("`{line}` failed: {e}");
                eprintln!("{e}");
            }
        }
    }
}

/// Logs every construction error and, in debug mode, also writes it to `out`.
fn report_init_errors(errors: &[Error], debug: bool, out: &mut dyn Write) {
    for e in errors {
        warn!("{e}");
        if debug {
            let _ = writeln!(out, "{e}");
        }
    }
}

impl Completer for Engine {
    fn complete(&self, text: &str) -> Completion {
        self.matcher(text)
    }
}
