//! Type definitions for line editing state.
//!
//! The editor keeps the text as typed apart from the text currently shown, so
//! cycling through suggestions always splices into the original word.

use treeshell_core::engine::{Completer, Completion};

/// Direction to cycle through suggestions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// Replaces the byte range `start..end` of `text` with `replacement`.
///
/// Out of range or non-boundary offsets leave `text` untouched.
#[must_use]
pub fn splice(text: &str, start: usize, end: usize, replacement: &str) -> String {
    match (text.get(..start), text.get(end..)) {
        (Some(head), Some(tail)) if start <= end => format!("{head}{replacement}{tail}"),
        _ => text.to_string(),
    }
}

/// State of the line being edited.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct EditorState {
    /// Text shown on the prompt line
    pub buffer: String,
    /// Text as typed, before any suggestion was spliced in
    typed: String,
    /// Completion computed for `typed`
    pub completion: Completion,
    /// Index into `completion.suggestions` of the spliced suggestion
    pub selected: Option<usize>,
}

impl EditorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes suggestions for the current buffer.
    pub fn refresh(&mut self, completer: &dyn Completer) {
        self.typed = self.buffer.clone();
        self.completion = completer.complete(&self.buffer);
        self.selected = None;
    }

    pub fn insert(&mut self, c: char, completer: &dyn Completer) {
        self.buffer.push(c);
        self.refresh(completer);
    }

    pub fn backspace(&mut self, completer: &dyn Completer) {
        if self.buffer.pop().is_some() {
            self.refresh(completer);
        }
    }

    /// Empties the line and refreshes suggestions for it.
    pub fn clear(&mut self, completer: &dyn Completer) {
        self.buffer.clear();
        self.refresh(completer);
    }

    /// Stops showing suggestions until the next edit.
    pub fn hide_suggestions(&mut self) {
        self.typed = self.buffer.clone();
        self.completion = Completion::default();
        self.selected = None;
    }

    /// Selects the next selectable suggestion in `direction` and splices it
    /// into the typed text.
    pub fn cycle(&mut self, direction: CycleDirection) {
        let selectable: Vec<usize> = self
            .completion
            .suggestions
            .iter()
            .enumerate()
            .filter(|(_, suggestion)| suggestion.selectable)
            .map(|(i, _)| i)
            .collect();

        if selectable.is_empty() {
            return;
        }

        let position = self
            .selected
            .and_then(|selected| selectable.iter().position(|i| *i == selected));

        let next = match (position, direction) {
            (None, CycleDirection::Down) => 0,
            (None, CycleDirection::Up) => selectable.len() - 1,
            (Some(p), CycleDirection::Down) => (p + 1) % selectable.len(),
            (Some(p), CycleDirection::Up) => (p + selectable.len() - 1) % selectable.len(),
        };

        let index = selectable[next];
        self.selected = Some(index);
        self.buffer = splice(
            &self.typed,
            self.completion.start,
            self.completion.end,
            &self.completion.suggestions[index].text,
        );
    }

    /// Hands over the finished line and resets the editor.
    pub fn take_line(&mut self) -> String {
        let line = std::mem::take(&mut self.buffer);
        *self = Self::new();
        line
    }
}
