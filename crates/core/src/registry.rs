//! Name to function lookup tables for handlers and injectors.
//!
//! Application code registers everything before an [`Engine`] is built.
//! Building a grammar tree seals the registry, and any later registration is
//! rejected with [`Error::RegistrySealed`].
//!
//! [`Engine`]: crate::engine::Engine

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;

use crate::context::GrammarContext;
use crate::error::{Error, Result};
use crate::grammar::Suggestion;
use crate::messages::{self, Message};

/// Name of the built-in handler that terminates the process.
pub const EXIT_HANDLER: &str = "exit";

/// Everything a handler gets to see about the line that reached it.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// Values captured by option nodes, keyed by option name
    pub params: &'a IndexMap<String, String>,
    /// The full raw input line
    pub text: &'a str,
    /// Resolved language preference list
    pub languages: &'a [String],
}

pub type Handler = Rc<dyn Fn(&Invocation<'_>) -> Result<()>>;

pub type Injector = Rc<dyn Fn(&GrammarContext) -> Vec<Suggestion>>;

/// Handlers invoked when a walk does not end on a bound handler.
#[derive(Clone)]
pub struct Fallbacks {
    /// Runs for a matched node without a handler, or one whose handler name
    /// could not be resolved
    pub not_implemented: Handler,
    /// Runs when the line does not resolve to exactly one node
    pub no_command: Handler,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            not_implemented: Rc::new(not_implemented),
            no_command: Rc::new(no_command),
        }
    }
}

fn not_implemented(invocation: &Invocation<'_>) -> Result<()> {
    print_message(Message::NotImplemented, invocation)
}

fn no_command(invocation: &Invocation<'_>) -> Result<()> {
    print_message(Message::NoCommand, invocation)
}

fn exit(_: &Invocation<'_>) -> Result<()> {
    std::process::exit(0)
}

fn print_message(message: Message, invocation: &Invocation<'_>) -> Result<()> {
    let values = HashMap::from([("text".to_string(), invocation.text.to_string())]);
    let (_, text) = messages::localize(message, invocation.languages, &values)?;
    println!("{text}");
    Ok(())
}

pub struct Registry {
    handlers: HashMap<String, Handler>,
    injectors: HashMap<String, Injector>,
    fallbacks: Fallbacks,
    sealed: bool,
}

impl Default for Registry {
    /// A registry holding the built-in `exit` handler.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .handlers
            .insert(EXIT_HANDLER.to_string(), Rc::new(exit));
        registry
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut handlers: Vec<&String> = self.handlers.keys().collect();
        handlers.sort();
        let mut injectors: Vec<&String> = self.injectors.keys().collect();
        injectors.sort();

        f.debug_struct("Registry")
            .field("handlers", &handlers)
            .field("injectors", &injectors)
            .field("sealed", &self.sealed)
            .finish()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry without any built-in handler.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
            injectors: HashMap::new(),
            fallbacks: Fallbacks::default(),
            sealed: false,
        }
    }

    fn ensure_open(&self, name: &str) -> Result<()> {
        if self.sealed {
            return Err(Error::RegistrySealed(name.to_string()));
        }

        Ok(())
    }

    /// Binds `handler` to `name`, replacing an earlier registration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistrySealed`] once a grammar tree was built from
    /// this registry.
    pub fn register_handler<F>(&mut self, name: &str, handler: F) -> Result<()>
    where
        F: Fn(&Invocation<'_>) -> Result<()> + 'static,
    {
        self.ensure_open(name)?;

        if self
            .handlers
            .insert(name.to_string(), Rc::new(handler))
            .is_some()
        {
            debug!("Replaced handler `{name}`");
        }

        Ok(())
    }

    /// Binds `injector` to `name`, replacing an earlier registration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistrySealed`] once a grammar tree was built from
    /// this registry.
    pub fn register_injector<F>(&mut self, name: &str, injector: F) -> Result<()>
    where
        F: Fn(&GrammarContext) -> Vec<Suggestion> + 'static,
    {
        self.ensure_open(name)?;

        if self
            .injectors
            .insert(name.to_string(), Rc::new(injector))
            .is_some()
        {
            debug!("Replaced injector `{name}`");
        }

        Ok(())
    }

    /// Replaces the handler run for lines that match no single command.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistrySealed`] once a grammar tree was built from
    /// this registry.
    pub fn set_no_command_handler<F>(&mut self, handler: F) -> Result<()>
    where
        F: Fn(&Invocation<'_>) -> Result<()> + 'static,
    {
        self.ensure_open("no command handler")?;
        self.fallbacks.no_command = Rc::new(handler);
        Ok(())
    }

    /// Replaces the handler run for matched commands without an implementation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistrySealed`] once a grammar tree was built from
    /// this registry.
    pub fn set_not_implemented_handler<F>(&mut self, handler: F) -> Result<()>
    where
        F: Fn(&Invocation<'_>) -> Result<()> + 'static,
    {
        self.ensure_open("not implemented handler")?;
        self.fallbacks.not_implemented = Rc::new(handler);
        Ok(())
    }

    #[must_use]
    pub fn handler(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).cloned()
    }

    #[must_use]
    pub fn injector(&self, name: &str) -> Option<Injector> {
        self.injectors.get(name).cloned()
    }

    #[must_use]
    pub fn fallbacks(&self) -> &Fallbacks {
        &self.fallbacks
    }

    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }
}
