use std::env;
use std::io::{stdin, stdout, IsTerminal, Write};

use log::debug;
use treeshell_core::engine::{Completer, LineReader};
use treeshell_core::error::Result;

/// Whether the raw-mode editor can be used on this terminal.
#[must_use]
pub fn supports_interactive_input() -> bool {
    if !stdin().is_terminal() || !stdout().is_terminal() {
        return false;
    }

    // Control sequences are not understood by dumb terminals
    !env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb"))
}

/// Strips the line terminator left by `read_line`.
fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Reads whole lines from stdin without suggestions, for pipes and dumb terminals.
#[derive(Default)]
pub struct PlainReader;

impl PlainReader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LineReader for PlainReader {
    fn read_line(&mut self, prefix: &str, _completer: &dyn Completer) -> Result<Option<String>> {
        print!("{prefix}");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            debug!("Reached end of input");
            return Ok(None);
        }

        Ok(Some(trim_line_ending(&input).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_line_ending() {
        assert_eq!(trim_line_ending("help version\n"), "help version");
        assert_eq!(trim_line_ending("help version\r\n"), "help version");
        assert_eq!(trim_line_ending("help  "), "help  ");
        assert_eq!(trim_line_ending(""), "");
    }
}
