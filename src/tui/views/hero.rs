//! Hero card view.
//!
//! Terminal rendering of the card: the icon pair as colored labels, the
//! hero's name, the two powers, and the generate hint in edit mode.
//!
//! ```text
//! ┌ Jarbis ───────────────────────────┐
//! │     ◆ CircleShapeSolid / Airplane │
//! │          The Captain Comet        │
//! │         (Flight + Strength)       │
//! │          [g] Generate             │
//! └───────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::hero::{DisplayMode, HeroProperties};
use crate::tui::theme;

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// View state for the card screen.
#[derive(Debug, Clone, Default)]
pub struct HeroViewState {
    /// Last status message shown under the card.
    pub status: Option<(StatusLevel, String)>,
    /// Whether a regenerate request is outstanding.
    pub loading: bool,
}

impl HeroViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, level: StatusLevel, message: impl Into<String>) {
        self.status = Some((level, message.into()));
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Lines making up the card body.
pub fn card_lines(props: &HeroProperties, mode: DisplayMode) -> Vec<Line<'static>> {
    let background = theme::hero_color(&props.background_color);
    let foreground = theme::hero_color(&props.foreground_color);

    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(
                format!("◆ {}", props.background_icon),
                Style::default().fg(background),
            ),
            Span::styled(" / ", theme::muted()),
            Span::styled(
                props.foreground_icon.clone(),
                Style::default().fg(foreground).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            format!("The {}", props.name),
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        )),
    ];

    if props.has_powers() {
        lines.push(Line::from(Span::styled(
            format!("({} + {})", props.primary_power, props.secondary_power),
            theme::muted(),
        )));
    }

    if mode == DisplayMode::Edit {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("[g]", Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)),
            Span::raw(" Generate"),
        ]));
    }

    lines
}

/// Render the card into `area`.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    props: &HeroProperties,
    mode: DisplayMode,
    state: &HeroViewState,
) {
    let mut lines = card_lines(props, mode);

    if state.loading {
        lines.push(Line::from(Span::styled("Summoning...", theme::muted())));
    } else if let Some((level, message)) = &state.status {
        let color = match level {
            StatusLevel::Info => theme::INFO,
            StatusLevel::Warning => theme::WARNING,
            StatusLevel::Error => theme::ERROR,
        };
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(message.clone(), Style::default().fg(color))));
    }

    let title = match mode {
        DisplayMode::Edit => " Jarbis (edit) ",
        DisplayMode::Read => " Jarbis ",
    };

    let paragraph = Paragraph::new(lines)
        .block(theme::block(title))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
