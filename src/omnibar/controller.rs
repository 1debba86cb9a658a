//! Omnibar interaction state machine.
//!
//! All interaction state lives in one [`Omnibar`] struct owned by the
//! main loop: the input text and caret, the suggestion list, the
//! keyboard highlight, the mouse hover, which modality last touched the
//! highlight, the typed text saved before keyboard navigation, and the
//! fetch generation counter used to drop stale completions.
//!
//! The controller is pure state: it consumes key events and semantic
//! mouse calls (the runtime maps coordinates to rows) and reports what
//! the runtime should do next via [`KeyOutcome`]. It never performs I/O.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::fetcher::FetchOutcome;

/// Which input modality last set the visible highlight.
///
/// Keyboard navigation and mouse hover are mutually exclusive cosmetic
/// states; the last interaction wins. Only keyboard navigation moves the
/// committed highlight index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionSource {
    /// No interaction yet.
    #[default]
    None,
    /// A key event was seen last.
    Keyboard,
    /// A hover was seen last.
    Mouse,
}

/// What the runtime should do after the controller handles a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// State may have changed; nothing further to do.
    Handled,
    /// The query text changed; a suggestion fetch should be issued.
    QueryChanged,
    /// The user committed this text to the selected engine.
    Commit(String),
    /// The user asked to leave the omnibar.
    Exit,
}

/// A fetch the controller wants issued: the query at the time of the
/// request plus the generation that must match for its completion to be
/// applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Query text to fetch suggestions for.
    pub query: String,
    /// Generation stamped on the response for staleness checks.
    pub generation: u64,
}

/// The omnibar widget state.
#[derive(Debug, Default)]
pub struct Omnibar {
    input: String,
    caret: usize,
    suggestions: Vec<String>,
    active: Option<usize>,
    hover: Option<usize>,
    interaction: InteractionSource,
    saved_input: Option<String>,
    popup_visible: bool,
    generation: u64,
}

impl Omnibar {
    /// Creates an empty omnibar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an omnibar preloaded with `query`, caret at the end.
    #[must_use]
    pub fn with_query(query: &str) -> Self {
        let mut bar = Self::new();
        bar.set_input_text(query.to_string());
        bar
    }

    /// Current input text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Caret position in characters.
    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Current suggestion list.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Whether the suggestion popup is shown.
    #[must_use]
    pub fn popup_visible(&self) -> bool {
        self.popup_visible
    }

    /// The keyboard highlight index. Moved only by keyboard navigation;
    /// always `None` or in bounds.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The row to render highlighted: the hover row when the mouse acted
    /// last, otherwise the keyboard highlight.
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        match self.interaction {
            InteractionSource::Mouse => self.hover.filter(|&i| i < self.suggestions.len()),
            _ => self.active,
        }
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        self.interaction = InteractionSource::Keyboard;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => KeyOutcome::Exit,
                _ => {
                    self.active = None;
                    KeyOutcome::Handled
                }
            };
        }

        match key.code {
            KeyCode::Down => {
                self.navigate(true);
                KeyOutcome::Handled
            }
            KeyCode::Up => {
                self.navigate(false);
                KeyOutcome::Handled
            }
            KeyCode::Tab => {
                self.accept_highlight();
                KeyOutcome::Handled
            }
            KeyCode::Right => {
                if !self.accept_highlight() {
                    self.caret = (self.caret + 1).min(self.input.chars().count());
                }
                KeyOutcome::Handled
            }
            KeyCode::Enter => {
                if self.popup_visible {
                    if let Some(text) = self.active.and_then(|i| self.suggestions.get(i)) {
                        return KeyOutcome::Commit(text.clone());
                    }
                }
                if self.input.trim().is_empty() {
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Commit(self.input.clone())
                }
            }
            KeyCode::Esc => {
                if self.popup_visible {
                    self.active = None;
                    if let Some(saved) = self.saved_input.take() {
                        if !saved.is_empty() {
                            self.set_input_text(saved);
                        }
                    }
                    self.popup_visible = false;
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Exit
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                self.active = None;
                self.insert_char(c);
                KeyOutcome::QueryChanged
            }
            KeyCode::Backspace => {
                self.active = None;
                if self.backspace() {
                    KeyOutcome::QueryChanged
                } else {
                    KeyOutcome::Handled
                }
            }
            KeyCode::Delete => {
                self.active = None;
                if self.delete() {
                    KeyOutcome::QueryChanged
                } else {
                    KeyOutcome::Handled
                }
            }
            KeyCode::Left => {
                self.active = None;
                self.caret = self.caret.saturating_sub(1);
                KeyOutcome::Handled
            }
            KeyCode::Home => {
                self.active = None;
                self.caret = 0;
                KeyOutcome::Handled
            }
            KeyCode::End => {
                self.active = None;
                self.caret = self.input.chars().count();
                KeyOutcome::Handled
            }
            _ => {
                // Anything else means the user is doing something other
                // than picking a suggestion.
                self.active = None;
                KeyOutcome::Handled
            }
        }
    }

    /// Records a mouse hover over suggestion row `index`.
    pub fn on_hover(&mut self, index: usize) {
        if index < self.suggestions.len() {
            self.hover = Some(index);
            self.interaction = InteractionSource::Mouse;
        }
    }

    /// A click on suggestion row `index`; returns the text to commit.
    pub fn on_click(&mut self, index: usize) -> Option<String> {
        self.suggestions.get(index).cloned()
    }

    /// A click outside the omnibar region dismisses the popup.
    pub fn on_click_outside(&mut self) {
        self.popup_visible = false;
    }

    /// Starts a suggestion fetch for the current input.
    ///
    /// Returns `None` with the list cleared and hidden when the input is
    /// empty. Otherwise bumps the generation counter and returns the
    /// ticket to hand to the fetch worker.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.input.is_empty() {
            self.clear_suggestions();
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        Some(FetchTicket {
            query: self.input.clone(),
            generation: self.generation,
        })
    }

    /// Applies a completed fetch.
    ///
    /// A completion whose generation is not the latest issued is stale
    /// and dropped without touching the list. Throttled and failed
    /// fetches leave the rendered list as it was.
    pub fn apply_fetch(&mut self, generation: u64, outcome: FetchOutcome) {
        if generation != self.generation {
            tracing::trace!(generation, latest = self.generation, "stale completion dropped");
            return;
        }
        match outcome {
            FetchOutcome::Suggestions(list) => {
                self.active = None;
                self.hover = None;
                self.popup_visible = !list.is_empty();
                self.suggestions = list;
            }
            FetchOutcome::Throttled | FetchOutcome::Failed => {}
        }
    }

    /// Clears and hides the suggestion list. In-flight completions
    /// become stale: the generation moves past every issued ticket.
    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.active = None;
        self.hover = None;
        self.popup_visible = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Moves the keyboard highlight with wrap-around, saving the typed
    /// text on the first move and copying the highlighted suggestion
    /// into the input.
    fn navigate(&mut self, down: bool) {
        let len = self.suggestions.len();
        if len == 0 || !self.popup_visible {
            self.active = None;
            return;
        }
        if self.active.is_none() {
            self.saved_input = Some(self.input.clone());
        }
        let next = match (down, self.active) {
            (true, None) => 0,
            (true, Some(i)) => (i + 1) % len,
            (false, None) => len - 1,
            (false, Some(i)) => (i + len - 1) % len,
        };
        self.active = Some(next);
        self.set_input_text(self.suggestions[next].clone());
    }

    /// Copies the highlighted suggestion into the input without
    /// committing it. Returns whether a highlight was accepted.
    fn accept_highlight(&mut self) -> bool {
        if !self.popup_visible {
            return false;
        }
        match self.active.and_then(|i| self.suggestions.get(i)) {
            Some(text) => {
                self.set_input_text(text.clone());
                true
            }
            None => false,
        }
    }

    fn set_input_text(&mut self, text: String) {
        self.caret = text.chars().count();
        self.input = text;
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.caret)
            .map_or(self.input.len(), |(i, _)| i)
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index();
        self.input.insert(at, c);
        self.caret += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.caret -= 1;
        let at = self.byte_index();
        self.input.remove(at);
        true
    }

    fn delete(&mut self) -> bool {
        if self.caret >= self.input.chars().count() {
            return false;
        }
        let at = self.byte_index();
        self.input.remove(at);
        true
    }
}
