//! Terminal runtime and event loop.
//!
//! Owns the terminal (raw mode, alternate screen, mouse capture), a
//! dedicated input thread polling crossterm events into a channel, and
//! the main loop that feeds the controller, drains fetch completions,
//! and draws at a fixed cadence. Screen flow (bar, settings overlay,
//! confirm dialog) lives here too: the controller knows nothing about
//! settings or dialogs.

use std::io::stdout;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::DefaultTerminal;
use wisp_suggest::SearchEngine;

use super::controller::{KeyOutcome, Omnibar};
use super::fetcher::{FetchRequest, Fetcher};
use super::render::{self, Areas};
use crate::dispatch;
use crate::error::{Result, WispError};
use crate::settings::Settings;

const DRAW_INTERVAL: Duration = Duration::from_millis(16);
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Which UI layer receives input.
#[derive(Debug)]
pub(crate) enum Screen {
    /// The omnibar itself.
    Bar,
    /// The settings overlay.
    Settings(SettingsPane),
    /// A modal yes/no dialog.
    Confirm(ConfirmDialog),
}

/// Cursor state of the settings overlay.
#[derive(Debug, Default)]
pub(crate) struct SettingsPane {
    /// Index of the selected row.
    pub selected: usize,
    /// Whether the proxy URL field is being edited.
    pub editing: bool,
    /// In-progress proxy URL text.
    pub draft: String,
}

/// A pending yes/no question and where to return afterwards.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConfirmDialog {
    pub kind: ConfirmKind,
    /// Return to the settings overlay at this row, or to the bar.
    pub back_to_settings: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfirmKind {
    /// First-use consent for sending keystrokes to suggestion endpoints.
    NetworkConsent,
    /// Shown when the user turns the fetch proxy on.
    ProxyDisclaimer,
}

/// Rows of the settings overlay, top to bottom: one radio per engine,
/// then the two toggles and the proxy URL field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingsRow {
    Engine(usize),
    Suggestions,
    Proxy,
    ProxyUrl,
}

pub(crate) fn settings_row_count() -> usize {
    SearchEngine::all().len() + 3
}

pub(crate) fn settings_row(index: usize) -> SettingsRow {
    let engines = SearchEngine::all().len();
    match index {
        i if i < engines => SettingsRow::Engine(i),
        i if i == engines => SettingsRow::Suggestions,
        i if i == engines + 1 => SettingsRow::Proxy,
        _ => SettingsRow::ProxyUrl,
    }
}

/// Runs the omnibar to completion and dispatches the committed query,
/// if any, once the terminal is restored.
pub async fn run(
    settings: Settings,
    settings_path: PathBuf,
    initial_query: Option<String>,
) -> Result<()> {
    let fetcher = Fetcher::spawn(settings.suggest_config())
        .map_err(|e| WispError::Settings(e.to_string()))?;
    let mut app = App::new(settings, settings_path, initial_query, fetcher);

    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(stdout(), EnableMouseCapture)?;

    let (event_tx, event_rx) = mpsc::channel();
    let event_loop_running = Arc::new(AtomicBool::new(true));
    let event_loop_flag = Arc::clone(&event_loop_running);

    let event_thread = thread::spawn(move || -> std::io::Result<()> {
        while event_loop_flag.load(Ordering::Relaxed) {
            if event::poll(EVENT_POLL_INTERVAL)? {
                let event = event::read()?;
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        }
        Ok(())
    });

    let result = app.event_loop(&mut terminal, &event_rx).await;

    ratatui::restore();
    execute!(stdout(), DisableMouseCapture)?;

    event_loop_running.store(false, Ordering::Relaxed);
    match event_thread.join() {
        Ok(join_result) => join_result?,
        Err(err) => std::panic::resume_unwind(err),
    }
    result?;

    if let Some(query) = app.committed.take() {
        let url = dispatch::commit(
            app.settings.search.engine,
            &query,
            &app.settings.search.language,
        )?;
        tracing::info!(%url, query = %query, "dispatched query");
    }
    Ok(())
}

/// The whole application state driven by the event loop.
struct App {
    settings: Settings,
    settings_path: PathBuf,
    bar: Omnibar,
    screen: Screen,
    areas: Areas,
    fetcher: Fetcher,
    pending_fetch: bool,
    committed: Option<String>,
    should_exit: bool,
}

impl App {
    fn new(
        settings: Settings,
        settings_path: PathBuf,
        initial_query: Option<String>,
        fetcher: Fetcher,
    ) -> Self {
        let bar = match initial_query.as_deref() {
            Some(query) if !query.is_empty() => Omnibar::with_query(query),
            _ => Omnibar::new(),
        };
        let pending_fetch = !bar.input().is_empty();
        // Suggestions are on by default, but the first run still asks.
        let screen = if settings.search.suggestions_enabled && !settings.network_consent_given {
            Screen::Confirm(ConfirmDialog {
                kind: ConfirmKind::NetworkConsent,
                back_to_settings: None,
            })
        } else {
            Screen::Bar
        };
        Self {
            settings,
            settings_path,
            bar,
            screen,
            areas: Areas::default(),
            fetcher,
            pending_fetch,
            committed: None,
            should_exit: false,
        }
    }

    async fn event_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        events: &mpsc::Receiver<Event>,
    ) -> Result<()> {
        loop {
            loop {
                match events.try_recv() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.on_key(key),
                    Ok(Event::Mouse(mouse)) => self.on_mouse(mouse),
                    Ok(_) => {}
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        return Err(WispError::Channel(
                            "input event channel disconnected".to_string(),
                        ));
                    }
                }
            }

            if self.should_exit {
                return Ok(());
            }

            self.pump_fetch_responses();
            self.issue_pending_fetch();

            terminal.draw(|frame| {
                self.areas = render::draw(frame, &self.bar, &self.settings, &self.screen);
            })?;

            tokio::time::sleep(DRAW_INTERVAL).await;
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Bar => self.on_bar_key(key),
            Screen::Settings(_) => self.on_settings_key(key),
            Screen::Confirm(_) => self.on_confirm_key(key),
        }
    }

    fn on_bar_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('o') {
            self.screen = Screen::Settings(SettingsPane::default());
            return;
        }
        match self.bar.handle_key(key) {
            KeyOutcome::Handled => {}
            KeyOutcome::QueryChanged => self.pending_fetch = true,
            KeyOutcome::Commit(text) => {
                self.committed = Some(text);
                self.should_exit = true;
            }
            KeyOutcome::Exit => self.should_exit = true,
        }
    }

    fn on_settings_key(&mut self, key: KeyEvent) {
        let Screen::Settings(pane) = &mut self.screen else {
            return;
        };

        if pane.editing {
            match key.code {
                KeyCode::Enter => {
                    let draft = std::mem::take(&mut pane.draft);
                    pane.editing = false;
                    self.save_proxy_url(&draft);
                }
                KeyCode::Esc => {
                    pane.editing = false;
                    pane.draft.clear();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    pane.draft.push(c);
                }
                KeyCode::Backspace => {
                    pane.draft.pop();
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.screen = Screen::Bar,
            KeyCode::Up => {
                pane.selected = (pane.selected + settings_row_count() - 1) % settings_row_count();
            }
            KeyCode::Down => {
                pane.selected = (pane.selected + 1) % settings_row_count();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let selected = pane.selected;
                self.activate_settings_row(selected);
            }
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_exit = true;
            }
            _ => {}
        }
    }

    fn on_confirm_key(&mut self, key: KeyEvent) {
        let agreed = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return,
        };
        let Screen::Confirm(dialog) = &self.screen else {
            return;
        };
        let dialog = *dialog;

        match dialog.kind {
            ConfirmKind::NetworkConsent => {
                if agreed {
                    self.settings.network_consent_given = true;
                }
                // The toggle goes on either way; unconsented fetches may
                // simply fail upstream and are swallowed like any other
                // fetch error.
                self.settings.set_suggestions_enabled(true);
                self.persist();
            }
            ConfirmKind::ProxyDisclaimer => {
                if agreed {
                    self.settings.proxy.enabled = true;
                    self.persist();
                    self.reconfigure_fetcher();
                }
            }
        }

        self.screen = match dialog.back_to_settings {
            Some(selected) => Screen::Settings(SettingsPane {
                selected,
                ..SettingsPane::default()
            }),
            None => Screen::Bar,
        };
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match self.screen {
            Screen::Bar => match mouse.kind {
                MouseEventKind::Moved => {
                    if let Some(index) = self.areas.suggestion_row_at(mouse.column, mouse.row) {
                        self.bar.on_hover(index);
                    }
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(index) = self.areas.suggestion_row_at(mouse.column, mouse.row) {
                        if let Some(text) = self.bar.on_click(index) {
                            self.committed = Some(text);
                            self.should_exit = true;
                        }
                    } else if !self.areas.omnibar_contains(mouse.column, mouse.row) {
                        self.bar.on_click_outside();
                    }
                }
                _ => {}
            },
            Screen::Settings(_) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    if let Some(index) = self.areas.settings_row_at(mouse.column, mouse.row) {
                        if let Screen::Settings(pane) = &mut self.screen {
                            pane.selected = index;
                            pane.editing = false;
                        }
                        self.activate_settings_row(index);
                    }
                }
            }
            Screen::Confirm(_) => {}
        }
    }

    fn activate_settings_row(&mut self, index: usize) {
        match settings_row(index) {
            SettingsRow::Engine(i) => {
                self.settings.search.engine = SearchEngine::all()[i];
                self.persist();
            }
            SettingsRow::Suggestions => {
                if self.settings.search.suggestions_enabled {
                    self.settings.set_suggestions_enabled(false);
                    self.bar.clear_suggestions();
                    self.persist();
                    self.reconfigure_fetcher();
                } else if self.settings.network_consent_given {
                    self.settings.set_suggestions_enabled(true);
                    self.persist();
                } else {
                    self.screen = Screen::Confirm(ConfirmDialog {
                        kind: ConfirmKind::NetworkConsent,
                        back_to_settings: Some(index),
                    });
                }
            }
            SettingsRow::Proxy => {
                // Unreachable toggle while suggestions are off.
                if !self.settings.search.suggestions_enabled {
                    return;
                }
                if self.settings.proxy.enabled {
                    self.settings.proxy.enabled = false;
                    self.persist();
                    self.reconfigure_fetcher();
                } else {
                    self.screen = Screen::Confirm(ConfirmDialog {
                        kind: ConfirmKind::ProxyDisclaimer,
                        back_to_settings: Some(index),
                    });
                }
            }
            SettingsRow::ProxyUrl => {
                if let Screen::Settings(pane) = &mut self.screen {
                    pane.editing = true;
                    pane.draft = if self.settings.proxy.url.trim().is_empty() {
                        String::new()
                    } else {
                        self.settings.proxy.url.clone()
                    };
                }
            }
        }
    }

    fn save_proxy_url(&mut self, raw: &str) {
        self.settings.set_proxy_url(raw);
        self.persist();
        self.reconfigure_fetcher();
    }

    fn pump_fetch_responses(&mut self) {
        while let Some(response) = self.fetcher.try_recv() {
            self.bar.apply_fetch(response.generation, response.outcome);
        }
    }

    fn issue_pending_fetch(&mut self) {
        // Held back while a dialog or the settings overlay is up.
        if !self.pending_fetch || !matches!(self.screen, Screen::Bar) {
            return;
        }
        self.pending_fetch = false;
        if !self.settings.search.suggestions_enabled {
            self.bar.clear_suggestions();
            return;
        }
        if let Some(ticket) = self.bar.begin_fetch() {
            self.fetcher.request(FetchRequest {
                engine: self.settings.search.engine,
                query: ticket.query,
                generation: ticket.generation,
            });
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.settings.save_to_file(&self.settings_path) {
            tracing::warn!(
                path = %self.settings_path.display(),
                error = %e,
                "failed to save settings"
            );
        }
    }

    fn reconfigure_fetcher(&self) {
        self.fetcher.reconfigure(self.settings.suggest_config());
    }
}
