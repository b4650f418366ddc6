//! Line input for the shell.
//!
//! Two [`LineReader`] front-ends are provided: [`TerminalReader`] edits the
//! line in raw mode and lists suggestions below the prompt as you type, and
//! [`PlainReader`] reads whole lines from stdin when no capable terminal is
//! attached.
//!
//! # Keys
//!
//! - Tab or Down selects the next suggestion, Shift-Tab or Up the previous
//! - Escape hides the suggestions until the next edit
//! - Ctrl-C clears the line, Ctrl-D on an empty line closes the shell
//! - Enter submits the line

pub mod input;
pub mod types;
pub mod ui;

pub use input::{supports_interactive_input, PlainReader};
pub use types::{CycleDirection, EditorState};
pub use ui::TerminalReader;

use treeshell_core::engine::LineReader;

/// Maximum number of suggestion rows drawn under the prompt
pub const MAX_SUGGESTION_ROWS: usize = 10;

/// Picks the best reader for the attached terminal.
#[must_use]
pub fn reader() -> Box<dyn LineReader> {
    if supports_interactive_input() {
        Box::new(TerminalReader::new())
    } else {
        Box::new(PlainReader::new())
    }
}
