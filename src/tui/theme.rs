//! Color theme for the Jarbis TUI, plus parsing of hero colors.
//!
//! Chrome colors are RGB truecolor constants. Hero colors come from list data
//! and are parsed at render time with [`parse_color`].

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Palette ─────────────────────────────────────────────────────────────────

/// Teal: focused borders, titles.
pub const PRIMARY: Color = Color::Rgb(0x00, 0x80, 0x80);
/// Coral: calls to action.
pub const ACCENT: Color = Color::Rgb(0xFF, 0x7F, 0x50);
/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
/// Muted text: secondary labels.
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Primary-colored bold text.
pub fn title() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Muted text for hints and secondary labels.
pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Bordered block with a styled title.
pub fn block(title_text: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PRIMARY))
        .title(title_text)
        .title_style(title())
}

// ── Hero colors ─────────────────────────────────────────────────────────────

/// Parse a hero color: `#RGB`, `#RRGGBB`, or a named color.
///
/// Returns `None` for anything unrecognized; callers fall back to [`TEXT`].
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    match value.to_ascii_lowercase().as_str() {
        "" => None,
        "orange" => Some(Color::Rgb(0xFF, 0xA5, 0x00)),
        "purple" => Some(Color::Rgb(0x80, 0x00, 0x80)),
        "pink" => Some(Color::Rgb(0xFF, 0xC0, 0xCB)),
        "brown" => Some(Color::Rgb(0xA5, 0x2A, 0x2A)),
        "teal" => Some(PRIMARY),
        other => other.parse::<Color>().ok(),
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(Color::Rgb(digits.next()??, digits.next()??, digits.next()??))
        }
        6 => Some(Color::Rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        _ => None,
    }
}

/// Hero color with the default text color as fallback.
pub fn hero_color(value: &str) -> Color {
    parse_color(value).unwrap_or(TEXT)
}
