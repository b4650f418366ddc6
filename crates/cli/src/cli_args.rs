//! Command-line argument parsing.
//!
//! This module defines the command-line interface of the `tsh` binary using
//! the `clap` crate.

use clap::Parser;

/// Command-line arguments for the treeshell CLI.
///
/// Without a trailing command the shell starts interactively; with one, that
/// single line is executed and the process exits.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use treeshell_cli::cli_args::Args;
///
/// let args = Args::parse_from(["tsh", "-l", "zh-CN", "help", "version"]);
/// assert_eq!(args.command_line(), Some("help version".to_string()));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the command grammar config file YAML.
    ///
    /// If not provided, defaults to `~/.treeshell/commands.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Language tag used for descriptions, e.g. `en-US` or `zh-CN`.
    ///
    /// Overrides `preferred_language` from the config file.
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Print problems found while building the grammar tree.
    #[arg(long, short = 'd', action)]
    pub debug: bool,

    /// Print the grammar tree and exit.
    #[arg(long, short = 't', action)]
    pub print_tree: bool,

    /// A command line to execute instead of starting the shell.
    ///
    /// # Examples
    /// ```bash
    /// tsh help version
    /// ```
    #[arg(trailing_var_arg = true)]
    pub command: Vec<String>,
}

impl Args {
    /// The trailing command words joined back into one line, if any.
    #[must_use]
    pub fn command_line(&self) -> Option<String> {
        if self.command.is_empty() {
            None
        } else {
            Some(self.command.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["tsh"]);

        assert!(args.config_path.is_none());
        assert!(args.language.is_none());
        assert!(!args.debug);
        assert!(!args.print_tree);
        assert!(args.command.is_empty());
        assert_eq!(args.command_line(), None);
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from(["tsh", "-c", "/custom/commands.yml", "-l", "zh-CN", "-d", "-t"]);

        assert_eq!(args.config_path, Some("/custom/commands.yml".to_string()));
        assert_eq!(args.language, Some("zh-CN".to_string()));
        assert!(args.debug);
        assert!(args.print_tree);
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "tsh",
            "--config-path",
            "/custom/commands.yml",
            "--language",
            "en-US",
            "--debug",
            "--print-tree",
        ]);

        assert_eq!(args.config_path, Some("/custom/commands.yml".to_string()));
        assert_eq!(args.language, Some("en-US".to_string()));
        assert!(args.debug);
        assert!(args.print_tree);
    }

    #[test]
    fn test_args_trailing_command() {
        let args = Args::parse_from(["tsh", "-d", "node", "drain", "worker-1"]);

        assert!(args.debug);
        assert_eq!(args.command, vec!["node", "drain", "worker-1"]);
        assert_eq!(args.command_line(), Some("node drain worker-1".to_string()));
    }

    #[test]
    fn test_args_trailing_command_keeps_dashes() {
        let args = Args::parse_from(["tsh", "echo", "-n"]);
        assert_eq!(args.command_line(), Some("echo -n".to_string()));
    }
}
