use std::io::{stdout, Stdout, Write};

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Color::{DarkBlue, DarkGrey, Red, Reset, White};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::queue;
use log::debug;
use treeshell_core::engine::{Completer, LineReader};
use treeshell_core::error::Result;
use treeshell_core::grammar::Suggestion;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::types::{CycleDirection, EditorState};
use super::MAX_SUGGESTION_ROWS;

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
    }
}

/// What a key press does to the line being edited.
enum KeyOutcome {
    Continue,
    Submit,
    Close,
}

/// Reads lines in raw mode, showing live suggestions under the prompt.
#[derive(Default)]
pub struct TerminalReader;

impl TerminalReader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LineReader for TerminalReader {
    fn read_line(&mut self, prefix: &str, completer: &dyn Completer) -> Result<Option<String>> {
        let mut stdout = stdout();
        let _raw_mode_guard = RawModeGuard::enter()?; // When this goes out of scope, raw mode is disabled

        let mut state = EditorState::new();
        state.refresh(completer);
        redraw(&mut stdout, prefix, &state)?;

        loop {
            let Event::Key(key_event) = event::read()? else {
                continue;
            };

            if key_event.kind != KeyEventKind::Press {
                continue;
            }

            match handle_key_event(key_event, &mut state, completer) {
                KeyOutcome::Continue => redraw(&mut stdout, prefix, &state)?,
                KeyOutcome::Submit => {
                    state.hide_suggestions();
                    redraw(&mut stdout, prefix, &state)?;
                    queue!(stdout, Print("\r\n"))?;
                    stdout.flush()?;
                    let line = state.take_line();
                    debug!("Read line `{line}`");
                    return Ok(Some(line));
                }
                KeyOutcome::Close => {
                    state.hide_suggestions();
                    redraw(&mut stdout, prefix, &state)?;
                    queue!(stdout, Print("\r\n"))?;
                    stdout.flush()?;
                    return Ok(None);
                }
            }
        }
    }
}

fn handle_key_event(
    key_event: KeyEvent,
    state: &mut EditorState,
    completer: &dyn Completer,
) -> KeyOutcome {
    let control = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Enter => return KeyOutcome::Submit,
        KeyCode::Char('d') if control => {
            if state.buffer.is_empty() {
                return KeyOutcome::Close;
            }
        }
        KeyCode::Char('c') if control => state.clear(completer),
        KeyCode::Tab | KeyCode::Down => state.cycle(CycleDirection::Down),
        KeyCode::BackTab | KeyCode::Up => state.cycle(CycleDirection::Up),
        KeyCode::Esc => state.hide_suggestions(),
        KeyCode::Backspace => state.backspace(completer),
        KeyCode::Char(c) if !control && !key_event.modifiers.contains(KeyModifiers::ALT) => {
            state.insert(c, completer);
        }
        _ => {}
    }

    KeyOutcome::Continue
}

fn redraw(stdout: &mut Stdout, prefix: &str, state: &EditorState) -> Result<()> {
    let (width, _) = terminal::size().unwrap_or((80, 24));

    queue!(
        stdout,
        MoveToColumn(0),
        Clear(ClearType::FromCursorDown),
        Print(prefix),
        Print(&state.buffer)
    )?;

    let suggestions = &state.completion.suggestions;
    let rows = visible_rows(suggestions.len(), state.selected);
    let key_width = suggestions[rows.clone()]
        .iter()
        .map(|suggestion| suggestion.text.width())
        .max()
        .unwrap_or(0);

    for index in rows.clone() {
        let suggestion = &suggestions[index];
        let row = format_row(suggestion, key_width, usize::from(width));
        queue!(stdout, Print("\r\n"))?;
        print_row(stdout, &row, suggestion, state.selected == Some(index))?;
    }

    let drawn = u16::try_from(rows.len()).unwrap_or(u16::MAX);
    if drawn > 0 {
        queue!(stdout, MoveUp(drawn))?;
    }

    let column = prefix.width() + state.buffer.width();
    queue!(stdout, MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX)))?;

    stdout.flush()?;
    Ok(())
}

/// The window of suggestion indexes to draw, keeping the selection visible.
fn visible_rows(total: usize, selected: Option<usize>) -> std::ops::Range<usize> {
    let shown = total.min(MAX_SUGGESTION_ROWS);
    let first = match selected {
        Some(selected) if selected >= shown => selected + 1 - shown,
        _ => 0,
    };
    first..first + shown
}

/// Key padded to `key_width` cells, then the description, cut to fit
/// `width` terminal cells minus one.
fn format_row(suggestion: &Suggestion, key_width: usize, width: usize) -> String {
    let padding = key_width.saturating_sub(suggestion.text.width());
    let row = format!(
        " {}{}  {} ",
        suggestion.text,
        " ".repeat(padding),
        suggestion.description
    );
    truncate_to_width(&row, width.saturating_sub(1))
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut truncated = String::new();
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > max_width {
            break;
        }
        used += char_width;
        truncated.push(c);
    }
    truncated
}

fn print_row(stdout: &mut Stdout, row: &str, suggestion: &Suggestion, selected: bool) -> Result<()> {
    let (foreground, background) = if !suggestion.selectable {
        (Red, Reset)
    } else if selected {
        (White, DarkBlue)
    } else {
        (Reset, DarkGrey)
    };

    queue!(
        stdout,
        SetForegroundColor(foreground),
        SetBackgroundColor(background),
        Print(row),
        SetAttribute(Attribute::Reset)
    )?;
    Ok(())
}
