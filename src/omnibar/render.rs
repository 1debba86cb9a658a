//! Ratatui rendering for the omnibar screens.
//!
//! `draw` paints the whole frame and returns the [`Areas`] the mouse
//! handlers hit-test against: the rects are captured at draw time, so
//! clicks always resolve against what is actually on screen.

use ratatui::layout::{Margin, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;
use wisp_suggest::SearchEngine;

use super::controller::Omnibar;
use super::runtime::{
    settings_row, settings_row_count, ConfirmKind, Screen, SettingsPane, SettingsRow,
};
use crate::i18n;
use crate::settings::Settings;

/// Widest the centered column gets on large terminals.
const MAX_COLUMN_WIDTH: u16 = 72;
/// Longest the dropdown gets; further suggestions scroll into view.
const MAX_POPUP_ROWS: u16 = 12;

const PROMPT: &str = "> ";
const PROXY_FIELD_LABEL: &str = "Proxy URL: ";

/// Screen regions captured during the last draw, for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub(crate) struct Areas {
    /// The bordered input box.
    pub bar: Rect,
    /// The suggestion dropdown, when visible.
    pub popup: Option<Rect>,
    /// Index of the first suggestion in the dropdown viewport.
    pub popup_offset: usize,
    /// Number of suggestion rows in the viewport.
    pub popup_rows: usize,
    /// The settings overlay panel, when open.
    pub settings: Option<Rect>,
    /// Number of settings rows on screen.
    pub settings_rows: usize,
}

impl Areas {
    /// Whether a point is inside the omnibar region (input box or
    /// dropdown). Clicks outside it dismiss the popup.
    pub(crate) fn omnibar_contains(&self, column: u16, row: u16) -> bool {
        let pos = Position::new(column, row);
        self.bar.contains(pos) || self.popup.is_some_and(|p| p.contains(pos))
    }

    /// Maps a point to the suggestion index under it.
    pub(crate) fn suggestion_row_at(&self, column: u16, row: u16) -> Option<usize> {
        let popup = self.popup?;
        let inner = popup.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let viewport_row = (row - inner.y) as usize;
        if viewport_row >= self.popup_rows {
            return None;
        }
        Some(self.popup_offset + viewport_row)
    }

    /// Maps a point to the settings row under it.
    pub(crate) fn settings_row_at(&self, column: u16, row: u16) -> Option<usize> {
        let panel = self.settings?;
        let inner = panel.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let index = (row - inner.y) as usize;
        (index < self.settings_rows).then_some(index)
    }
}

/// Draws one frame and reports where everything landed.
pub(crate) fn draw(
    frame: &mut Frame,
    bar: &Omnibar,
    settings: &Settings,
    screen: &Screen,
) -> Areas {
    let mut areas = Areas::default();
    let area = frame.area();
    if area.width < 12 || area.height < 5 {
        return areas;
    }

    let width = area.width.saturating_sub(2).min(MAX_COLUMN_WIDTH);
    let x = area.x + (area.width - width) / 2;
    let bar_rect = Rect {
        x,
        y: area.y + 1,
        width,
        height: 3,
    };
    areas.bar = bar_rect;
    draw_bar(frame, bar, bar_rect, matches!(screen, Screen::Bar));

    if bar.popup_visible() && !bar.suggestions().is_empty() {
        // Between the bar and the footer line.
        let space = area
            .bottom()
            .saturating_sub(1)
            .saturating_sub(bar_rect.bottom());
        let max_rows = space.saturating_sub(2).min(MAX_POPUP_ROWS);
        let visible = (bar.suggestions().len() as u16).min(max_rows);
        if visible > 0 {
            let popup_rect = Rect {
                x,
                y: bar_rect.bottom(),
                width,
                height: visible + 2,
            };
            let offset = scroll_offset(bar.highlighted(), visible as usize);
            draw_popup(frame, bar, popup_rect, offset, visible as usize);
            areas.popup = Some(popup_rect);
            areas.popup_offset = offset;
            areas.popup_rows = visible as usize;
        }
    }

    draw_footer(frame, area, bar, settings, screen);

    match screen {
        Screen::Settings(pane) => draw_settings(frame, area, settings, pane, &mut areas),
        Screen::Confirm(dialog) => draw_confirm(frame, area, settings, dialog.kind),
        Screen::Bar => {}
    }

    areas
}

fn draw_bar(frame: &mut Frame, bar: &Omnibar, rect: Rect, show_cursor: bool) {
    frame.render_widget(Block::bordered().title("wisp"), rect);
    let inner = rect.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    let text_width = (inner.width as usize).saturating_sub(PROMPT.len());
    let (window, cursor_x) = input_window(bar.input(), bar.caret(), text_width);
    let line = Line::from(vec![
        Span::styled(PROMPT, Style::new().add_modifier(Modifier::DIM)),
        Span::raw(window),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
    if show_cursor {
        frame.set_cursor_position((inner.x + PROMPT.len() as u16 + cursor_x, inner.y));
    }
}

fn draw_popup(frame: &mut Frame, bar: &Omnibar, rect: Rect, offset: usize, visible: usize) {
    frame.render_widget(Clear, rect);
    frame.render_widget(Block::bordered(), rect);
    let inner = rect.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    let highlight = bar.highlighted();
    for (index, suggestion) in bar
        .suggestions()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
    {
        let row_rect = Rect {
            x: inner.x,
            y: inner.y + (index - offset) as u16,
            width: inner.width,
            height: 1,
        };
        let style = if Some(index) == highlight {
            Style::new().add_modifier(Modifier::REVERSED)
        } else {
            Style::new()
        };
        frame.render_widget(
            Paragraph::new(truncate_row(suggestion, inner.width)).style(style),
            row_rect,
        );
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, bar: &Omnibar, settings: &Settings, screen: &Screen) {
    let text = match screen {
        Screen::Bar if bar.popup_visible() => format!(
            "Engine: {}  |  Up/Down navigate  Tab accept  Enter search  Ctrl+O settings",
            settings.search.engine.name()
        ),
        Screen::Bar => format!(
            "Engine: {}  |  Enter search  Ctrl+O settings  Esc quit",
            settings.search.engine.name()
        ),
        Screen::Settings(pane) if pane.editing => "Enter save  Esc cancel".to_string(),
        Screen::Settings(_) => "Up/Down select  Enter toggle  Esc close".to_string(),
        Screen::Confirm(_) => {
            let s = i18n::strings(&settings.search.language);
            format!("[y] {}  [n] {}", s.agree, s.cancel)
        }
    };
    let rect = Rect {
        x: area.x,
        y: area.bottom() - 1,
        width: area.width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::new().add_modifier(Modifier::DIM))
            .centered(),
        rect,
    );
}

fn draw_settings(
    frame: &mut Frame,
    area: Rect,
    settings: &Settings,
    pane: &SettingsPane,
    areas: &mut Areas,
) {
    let rows = settings_row_count() as u16;
    let width = area.width.saturating_sub(4).clamp(24, 56);
    let height = (rows + 2).min(area.height.saturating_sub(2));
    let rect = centered(area, width, height);
    frame.render_widget(Clear, rect);
    frame.render_widget(Block::bordered().title("Settings"), rect);
    let inner = rect.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });

    for index in 0..settings_row_count() {
        if index as u16 >= inner.height {
            break;
        }
        let row_rect = Rect {
            x: inner.x,
            y: inner.y + index as u16,
            width: inner.width,
            height: 1,
        };
        let (label, dim) = settings_row_label(settings, pane, index, inner.width);
        let mut style = Style::new();
        if dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if index == pane.selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        frame.render_widget(
            Paragraph::new(truncate_row(&label, inner.width)).style(style),
            row_rect,
        );
    }
    areas.settings = Some(rect);
    areas.settings_rows = settings_row_count().min(inner.height as usize);

    if pane.editing {
        let url_row = settings_row_count() - 1;
        if (url_row as u16) < inner.height {
            let prefix = PROXY_FIELD_LABEL.chars().count();
            let text_width = (inner.width as usize).saturating_sub(prefix);
            let (_, cursor_x) =
                input_window(&pane.draft, pane.draft.chars().count(), text_width);
            frame.set_cursor_position((
                inner.x + prefix as u16 + cursor_x,
                inner.y + url_row as u16,
            ));
        }
    }
}

fn settings_row_label(
    settings: &Settings,
    pane: &SettingsPane,
    index: usize,
    width: u16,
) -> (String, bool) {
    match settings_row(index) {
        SettingsRow::Engine(i) => {
            let engine = SearchEngine::all()[i];
            let mark = if settings.search.engine == engine {
                "(*)"
            } else {
                "( )"
            };
            (format!("{mark} {}", engine.name()), false)
        }
        SettingsRow::Suggestions => {
            let mark = if settings.search.suggestions_enabled {
                "[x]"
            } else {
                "[ ]"
            };
            (format!("{mark} Live suggestions"), false)
        }
        SettingsRow::Proxy => {
            let mark = if settings.proxy.enabled { "[x]" } else { "[ ]" };
            (
                format!("{mark} Route fetches through proxy"),
                !settings.search.suggestions_enabled,
            )
        }
        SettingsRow::ProxyUrl => {
            let shown = if pane.editing {
                let text_width = (width as usize).saturating_sub(PROXY_FIELD_LABEL.chars().count());
                input_window(&pane.draft, pane.draft.chars().count(), text_width).0
            } else if settings.proxy.url.trim().is_empty() {
                "(default)".to_string()
            } else {
                settings.proxy.url.clone()
            };
            (
                format!("{PROXY_FIELD_LABEL}{shown}"),
                !settings.search.suggestions_enabled,
            )
        }
    }
}

fn draw_confirm(frame: &mut Frame, area: Rect, settings: &Settings, kind: ConfirmKind) {
    let s = i18n::strings(&settings.search.language);
    let message = match kind {
        ConfirmKind::NetworkConsent => s.network_consent,
        ConfirmKind::ProxyDisclaimer => s.proxy_disclaimer,
    };
    let width = area.width.saturating_sub(4).clamp(20, 60);
    let lines = wrapped_line_count(message, (width as usize).saturating_sub(2));
    let height = (lines as u16 + 4).min(area.height.saturating_sub(2));
    let rect = centered(area, width, height);
    frame.render_widget(Clear, rect);
    frame.render_widget(Block::bordered(), rect);
    let inner = rect.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    let body = Rect {
        height: inner.height.saturating_sub(2),
        ..inner
    };
    frame.render_widget(Paragraph::new(message).wrap(Wrap { trim: true }), body);
    let buttons = Rect {
        y: inner.bottom().saturating_sub(1),
        height: 1,
        ..inner
    };
    frame.render_widget(
        Paragraph::new(format!("[y] {}    [n] {}", s.agree, s.cancel)).centered(),
        buttons,
    );
}

/// First suggestion index in the viewport: scrolls just far enough to
/// keep the highlighted row visible.
fn scroll_offset(highlight: Option<usize>, visible: usize) -> usize {
    match highlight {
        Some(i) if i >= visible => i + 1 - visible,
        _ => 0,
    }
}

/// The window of `text` shown in a `width`-cell field, and the caret's
/// x offset inside it. One cell is kept free so the caret can sit past
/// the last character.
fn input_window(text: &str, caret: usize, width: usize) -> (String, u16) {
    if width == 0 {
        return (String::new(), 0);
    }
    let chars: Vec<char> = text.chars().collect();
    let caret = caret.min(chars.len());
    let span = width.saturating_sub(1);
    let start = caret.saturating_sub(span);
    let end = chars.len().min(start + span);
    (chars[start..end].iter().collect(), (caret - start) as u16)
}

fn truncate_row(text: &str, width: u16) -> String {
    let width = width as usize;
    if width == 0 {
        return String::new();
    }
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    text.chars().count().div_ceil(width) + 1
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
