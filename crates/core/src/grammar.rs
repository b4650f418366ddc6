//! The grammar tree: matching, suggestion generation and dispatch.
//!
//! A tree is built once by [`TreeBuilder`] from the configured command map
//! and never changes afterwards. Both the suggestion walk and the execution
//! walk go through [`GrammarNode::index_endpoints`], which consumes the input
//! one token at a time:
//!
//! - every token but the last must match a child exactly, with no
//!   backtracking once a child has been chosen;
//! - the last token is matched as a prefix, and when several children fit
//!   and some of them are commands, only the commands are kept.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use indexmap::IndexMap;
use log::{debug, warn};

use crate::command_definitions::{CommandDefinition, NodeType};
use crate::config::DEFAULT_LANGUAGE;
use crate::context::GrammarContext;
use crate::error::{Error, Result};
use crate::messages::{self, Message};
use crate::registry::{Fallbacks, Handler, Injector, Registry};
use crate::translation::TranslationSet;

/// One completion entry offered to the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub description: String,
    /// False for notices such as "bad command" that must not be spliced into
    /// the input line
    pub selectable: bool,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
            selectable: true,
        }
    }

    pub fn notice(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
            selectable: false,
        }
    }
}

pub struct GrammarNode {
    key: String,
    node_type: NodeType,
    children: Vec<GrammarNode>,
    translations: TranslationSet,
    injector: Option<Injector>,
    handler: Option<Handler>,
}

impl Debug for GrammarNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrammarNode")
            .field("key", &self.key)
            .field("node_type", &self.node_type)
            .field("has_handler", &self.handler.is_some())
            .field("has_injector", &self.injector.is_some())
            .field("children", &self.children)
            .finish()
    }
}

impl GrammarNode {
    /// The unnamed node every walk starts from.
    fn root(children: Vec<GrammarNode>) -> Self {
        Self {
            key: String::new(),
            node_type: NodeType::Command,
            children,
            translations: TranslationSet::new(),
            injector: None,
            handler: None,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    #[must_use]
    pub fn children(&self) -> &[GrammarNode] {
        &self.children
    }

    #[must_use]
    pub fn translations(&self) -> &TranslationSet {
        &self.translations
    }

    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    #[must_use]
    pub fn has_injector(&self) -> bool {
        self.injector.is_some()
    }

    fn is_command(&self) -> bool {
        self.node_type == NodeType::Command
    }

    /// Whether `word` selects this node.
    ///
    /// Options accept anything. Commands accept a prefix of their key when
    /// not `strict`, honouring `ignore_case`, and only their exact key when
    /// `strict`. Strict matching is case-sensitive even with `ignore_case`.
    #[must_use]
    pub fn matched(&self, word: &str, strict: bool, ignore_case: bool) -> bool {
        match self.node_type {
            NodeType::Option => true,
            NodeType::Command if strict => self.key == word,
            NodeType::Command if word.is_empty() => true,
            NodeType::Command if ignore_case => {
                self.key.to_lowercase().starts_with(&word.to_lowercase())
            }
            NodeType::Command => self.key.starts_with(word),
        }
    }

    /// Walks `ctx` down from this node and returns the nodes the final token
    /// may resolve to. An empty result means the input left the grammar.
    pub fn index_endpoints<'a>(&'a self, ctx: &mut GrammarContext) -> Vec<&'a GrammarNode> {
        if self.node_type == NodeType::Option {
            if let Some(token) = ctx.previous().map(ToString::to_string) {
                ctx.set_param(&self.key, &token);
            }
        }

        if ctx.end() {
            let mut matched: Vec<&GrammarNode> = self
                .children
                .iter()
                .filter(|child| child.matched(ctx.last_word(), false, ctx.ignore_case()))
                .collect();

            if matched.len() > 1 && matched.iter().any(|child| child.is_command()) {
                matched.retain(|child| child.is_command());
            }

            return matched;
        }

        let current = ctx.current();
        let next = self
            .children
            .iter()
            .find(|child| child.is_command() && child.matched(current, true, ctx.ignore_case()))
            .or_else(|| {
                self.children
                    .iter()
                    .find(|child| child.matched(current, true, ctx.ignore_case()))
            });

        match next {
            Some(child) => {
                ctx.advance();
                child.index_endpoints(ctx)
            }
            None => {
                debug!("No child of `{}` matches `{}`", self.key, current);
                Vec::new()
            }
        }
    }

    /// Suggestions for the word being typed in `ctx`.
    pub fn index_suggestions(&self, ctx: &mut GrammarContext) -> Vec<Suggestion> {
        let endpoints = self.index_endpoints(ctx);

        if endpoints.is_empty() {
            return vec![bad_command(ctx)];
        }

        endpoints
            .iter()
            .flat_map(|endpoint| endpoint.prompts(ctx))
            .collect()
    }

    fn prompts(&self, ctx: &GrammarContext) -> Vec<Suggestion> {
        if let (NodeType::Option, Some(injector)) = (self.node_type, &self.injector) {
            return injector(ctx);
        }

        let (key, description) = self.translations.get_translation(ctx.languages());
        let key = if key.is_empty() { self.key.as_str() } else { key };

        vec![Suggestion::new(key, description)]
    }

    /// Dispatches the line in `ctx` to the handler of the node it resolves to.
    ///
    /// # Errors
    ///
    /// Returns whatever the invoked handler returns.
    pub fn execute(&self, ctx: &mut GrammarContext, fallbacks: &Fallbacks) -> Result<()> {
        let endpoints = self.index_endpoints(ctx);
        let last_word = ctx.last_word().to_string();

        match endpoints.as_slice() {
            [endpoint] if endpoint.matched(&last_word, true, ctx.ignore_case()) => {
                if endpoint.node_type == NodeType::Option {
                    ctx.set_param(&endpoint.key, &last_word);
                }

                let handler = endpoint
                    .handler
                    .as_ref()
                    .unwrap_or(&fallbacks.not_implemented);
                handler(&ctx.invocation())
            }
            _ => {
                debug!(
                    "`{}` resolved to {} command(s), none runnable",
                    ctx.text(),
                    endpoints.len()
                );
                (fallbacks.no_command)(&ctx.invocation())
            }
        }
    }
}

fn bad_command(ctx: &GrammarContext) -> Suggestion {
    let path = ctx.consumed_path();
    let values = HashMap::from([("path".to_string(), path.clone())]);

    match messages::localize(Message::BadCommand, ctx.languages(), &values) {
        Ok((key, description)) => Suggestion::notice(key, description),
        Err(e) => {
            warn!("Could not render the bad command message: {e}");
            Suggestion::notice(path, String::new())
        }
    }
}

/// Builds an immutable grammar tree bottom-up from configured commands,
/// resolving handler and injector names against a [`Registry`].
///
/// Unresolved names do not stop the build; they are collected and returned
/// next to the tree.
pub struct TreeBuilder<'r> {
    registry: &'r Registry,
    errors: Vec<Error>,
}

impl<'r> TreeBuilder<'r> {
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            errors: Vec::new(),
        }
    }

    /// Returns the root of the tree and every resolution error met.
    pub fn build(
        mut self,
        commands: &IndexMap<String, CommandDefinition>,
    ) -> (GrammarNode, Vec<Error>) {
        let children = self.build_children(commands, &[]);
        (GrammarNode::root(children), self.errors)
    }

    fn build_children(
        &mut self,
        commands: &IndexMap<String, CommandDefinition>,
        prefixes: &[&str],
    ) -> Vec<GrammarNode> {
        commands
            .iter()
            .map(|(name, definition)| self.build_node(name, definition, prefixes))
            .collect()
    }

    fn build_node(
        &mut self,
        name: &str,
        definition: &CommandDefinition,
        prefixes: &[&str],
    ) -> GrammarNode {
        let mut path = prefixes.to_vec();
        path.push(name);
        let path_text = path.join(" ");

        let handler = definition
            .handler
            .as_deref()
            .and_then(|handler_name| self.resolve_handler(&path_text, handler_name));

        let injector = match (definition.node_type, definition.examples.as_deref()) {
            (NodeType::Option, Some(injector_name)) => {
                self.resolve_injector(&path_text, injector_name)
            }
            (NodeType::Command, Some(injector_name)) => {
                warn!(
                    "Ignoring examples `{injector_name}` on command `{path_text}`: only options take examples"
                );
                None
            }
            (_, None) => None,
        };

        let translations = if !definition.descriptions.is_empty() {
            TranslationSet::from_descriptions(&definition.descriptions, name)
        } else if injector.is_none() {
            TranslationSet::from_items([(
                DEFAULT_LANGUAGE,
                name,
                definition.node_type.to_string().as_str(),
            )])
        } else {
            TranslationSet::new()
        };

        let children = self.build_children(&definition.commands, &path);

        GrammarNode {
            key: name.to_string(),
            node_type: definition.node_type,
            children,
            translations,
            injector,
            handler,
        }
    }

    /// Unresolved names leave the node unbound, so executing it reaches the
    /// not-implemented fallback.
    fn resolve_handler(&mut self, path: &str, handler_name: &str) -> Option<Handler> {
        let handler = self.registry.handler(handler_name);

        if handler.is_none() {
            self.errors.push(Error::handler_not_found(
                path.to_string(),
                handler_name.to_string(),
            ));
        }

        handler
    }

    fn resolve_injector(&mut self, path: &str, injector_name: &str) -> Option<Injector> {
        let injector = self.registry.injector(injector_name);

        if injector.is_none() {
            self.errors.push(Error::injector_not_found(
                path.to_string(),
                injector_name.to_string(),
            ));
        }

        injector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Invocation;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn parse_commands(yaml: &str) -> IndexMap<String, CommandDefinition> {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn context(text: &str) -> GrammarContext {
        GrammarContext::new(text, true, vec!["en-US".to_string()])
    }

    fn texts(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.text.as_str()).collect()
    }

    fn build(yaml: &str, registry: &Registry) -> GrammarNode {
        let (root, errors) = TreeBuilder::new(registry).build(&parse_commands(yaml));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        root
    }

    const SAMPLE: &str = r#"
help:
  commands:
    version: {}
    verbose: {}
    status:
      type: option
exit: {}
"#;

    #[test]
    fn test_option_matches_everything() {
        let root = build("value: {type: option}", &Registry::empty());
        let option = &root.children()[0];
        assert!(option.matched("", true, false));
        assert!(option.matched("anything", true, true));
        assert!(option.matched("x", false, false));
    }

    #[test]
    fn test_command_prefix_matching() {
        let root = build("Version: {}", &Registry::empty());
        let command = &root.children()[0];

        assert!(command.matched("", false, false));
        assert!(command.matched("Ver", false, false));
        assert!(!command.matched("ver", false, false));
        assert!(command.matched("ver", false, true));
        assert!(!command.matched("versions", false, true));
    }

    #[test]
    fn test_strict_matching_ignores_ignore_case() {
        let root = build("Version: {}", &Registry::empty());
        let command = &root.children()[0];

        assert!(command.matched("Version", true, false));
        assert!(!command.matched("version", true, true));
        assert!(!command.matched("Vers", true, true));
    }

    #[test]
    fn test_endpoints_at_top_level() {
        let root = build(SAMPLE, &Registry::empty());
        let mut ctx = context("");
        let endpoints = root.index_endpoints(&mut ctx);
        let keys: Vec<&str> = endpoints.iter().map(|n| n.key()).collect();
        assert_eq!(keys, vec!["help", "exit"]);
    }

    #[test]
    fn test_commands_win_over_options() {
        let root = build(SAMPLE, &Registry::empty());

        // "ver" matches both commands and the option; the option is dropped
        let mut ctx = context("help ver");
        let endpoints = root.index_endpoints(&mut ctx);
        let keys: Vec<&str> = endpoints.iter().map(|n| n.key()).collect();
        assert_eq!(keys, vec!["version", "verbose"]);

        // "xyz" only matches the option
        let mut ctx = context("help xyz");
        let endpoints = root.index_endpoints(&mut ctx);
        let keys: Vec<&str> = endpoints.iter().map(|n| n.key()).collect();
        assert_eq!(keys, vec!["status"]);
    }

    #[test]
    fn test_several_options_are_kept() {
        let root = build("a: {type: option}\nb: {type: option}", &Registry::empty());
        let mut ctx = context("x");
        assert_eq!(root.index_endpoints(&mut ctx).len(), 2);
    }

    #[test]
    fn test_dead_end_returns_nothing() {
        let root = build(SAMPLE, &Registry::empty());
        let mut ctx = context("nope version");
        assert!(root.index_endpoints(&mut ctx).is_empty());
        assert_eq!(ctx.consumed_path(), "nope");
    }

    #[test]
    fn test_option_captures_token() {
        let yaml = r#"
set:
  commands:
    key:
      type: option
      commands:
        value:
          type: option
"#;
        let root = build(yaml, &Registry::empty());
        let mut ctx = context("set color blue");
        let endpoints = root.index_endpoints(&mut ctx);

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].key(), "value");
        assert_eq!(ctx.params().get("key"), Some(&"color".to_string()));
        // The final option only records its value when executed
        assert_eq!(ctx.params().get("value"), None);
    }

    #[test]
    fn test_strict_walk_prefers_commands() {
        let yaml = r#"
show:
  commands:
    any:
      type: option
      commands:
        as-option: {}
    all:
      commands:
        as-command: {}
"#;
        let root = build(yaml, &Registry::empty());
        let mut ctx = context("show all as");
        let endpoints = root.index_endpoints(&mut ctx);
        let keys: Vec<&str> = endpoints.iter().map(|n| n.key()).collect();
        assert_eq!(keys, vec!["as-command"]);
    }

    #[test]
    fn test_suggestions_from_translations() {
        let yaml = r#"
version:
  descriptions:
    - language: en-US
      text: Show the version
    - language: zh-CN
      name: 版本
      text: 显示版本
"#;
        let root = build(yaml, &Registry::empty());

        let suggestions = root.index_suggestions(&mut context("v"));
        assert_eq!(suggestions, vec![Suggestion::new("version", "Show the version")]);

        let mut ctx = GrammarContext::new("v", true, vec!["zh-CN".to_string()]);
        let suggestions = root.index_suggestions(&mut ctx);
        assert_eq!(suggestions, vec![Suggestion::new("版本", "显示版本")]);
    }

    #[test]
    fn test_synthesized_english_entry() {
        let root = build(SAMPLE, &Registry::empty());
        let suggestions = root.index_suggestions(&mut context("help st"));
        assert_eq!(suggestions, vec![Suggestion::new("status", "option")]);

        let suggestions = root.index_suggestions(&mut context("ex"));
        assert_eq!(suggestions, vec![Suggestion::new("exit", "command")]);
    }

    #[test]
    fn test_bad_command_suggestion() {
        let root = build(SAMPLE, &Registry::empty());
        let suggestions = root.index_suggestions(&mut context("nope"));

        assert_eq!(suggestions.len(), 1);
        assert!(!suggestions[0].selectable);
        assert_eq!(suggestions[0].text, "bad command");
        assert_eq!(suggestions[0].description, "no command matches `nope`");
    }

    #[test]
    fn test_injector_suggestions() {
        let mut registry = Registry::empty();
        registry
            .register_injector("statuses", |ctx| {
                ["sb", "me"]
                    .iter()
                    .map(|s| Suggestion::new(*s, format!("after {}", ctx.tokens()[0])))
                    .collect()
            })
            .unwrap();
        let yaml = r#"
help:
  commands:
    status:
      type: option
      examples: statuses
"#;
        let root = build(yaml, &registry);
        let suggestions = root.index_suggestions(&mut context("help "));
        assert_eq!(texts(&suggestions), vec!["sb", "me"]);
        assert_eq!(suggestions[0].description, "after help");
        assert!(root.children()[0].children()[0].translations().is_empty());
    }

    #[test]
    fn test_execute_dispatches_to_handler() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::empty();
        let recorder = Rc::clone(&calls);
        registry
            .register_handler("set", move |invocation| {
                recorder
                    .borrow_mut()
                    .push((invocation.text.to_string(), invocation.params.clone()));
                Ok(())
            })
            .unwrap();

        let yaml = r#"
set:
  commands:
    key:
      type: option
      commands:
        value:
          type: option
          handler: set
"#;
        let root = build(yaml, &registry);
        root.execute(&mut context("set color blue"), registry.fallbacks())
            .unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "set color blue");
        let params: Vec<(&str, &str)> = calls[0]
            .1
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(params, vec![("key", "color"), ("value", "blue")]);
    }

    fn recording_fallbacks(log: &Rc<RefCell<Vec<String>>>) -> Fallbacks {
        let not_implemented = Rc::clone(log);
        let no_command = Rc::clone(log);
        Fallbacks {
            not_implemented: Rc::new(move |invocation: &Invocation<'_>| {
                not_implemented
                    .borrow_mut()
                    .push(format!("not implemented: {}", invocation.text));
                Ok(())
            }),
            no_command: Rc::new(move |invocation: &Invocation<'_>| {
                no_command
                    .borrow_mut()
                    .push(format!("no command: {}", invocation.text));
                Ok(())
            }),
        }
    }

    #[test]
    fn test_execute_fallbacks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let fallbacks = recording_fallbacks(&log);
        let root = build(SAMPLE, &Registry::empty());

        // Matched, but nothing is bound
        root.execute(&mut context("exit"), &fallbacks).unwrap();
        // Prefix only
        root.execute(&mut context("ex"), &fallbacks).unwrap();
        // Ambiguous
        root.execute(&mut context("help ver"), &fallbacks).unwrap();
        // Dead end
        root.execute(&mut context("nope"), &fallbacks).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "not implemented: exit",
                "no command: ex",
                "no command: help ver",
                "no command: nope",
            ]
        );
    }

    #[test]
    fn test_missing_names_are_collected() {
        let yaml = r#"
help:
  handler: missing_handler
  commands:
    status:
      type: option
      examples: missing_injector
"#;
        let registry = Registry::empty();
        let (root, errors) = TreeBuilder::new(&registry).build(&parse_commands(yaml));

        assert_eq!(errors.len(), 2);
        assert!(matches!(
            &errors[0],
            Error::HandlerNotFound { path, handler } if path == "help" && handler == "missing_handler"
        ));
        assert!(matches!(
            &errors[1],
            Error::InjectorNotFound { path, injector } if path == "help status" && injector == "missing_injector"
        ));

        let help = &root.children()[0];
        assert!(!help.has_handler());
        assert!(!help.children()[0].has_injector());
    }

    #[test]
    fn test_unresolved_handler_runs_not_implemented() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let fallbacks = recording_fallbacks(&log);
        let (root, errors) =
            TreeBuilder::new(&Registry::empty()).build(&parse_commands("help: {handler: gone}"));

        assert_eq!(errors.len(), 1);
        root.execute(&mut context("help"), &fallbacks).unwrap();
        assert_eq!(*log.borrow(), vec!["not implemented: help"]);
    }

    #[test]
    fn test_examples_ignored_on_commands() {
        let mut registry = Registry::empty();
        registry.register_injector("values", |_| Vec::new()).unwrap();
        let root = build("list: {examples: values}", &registry);
        assert!(!root.children()[0].has_injector());
    }
}
