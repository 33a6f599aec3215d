//! Apothecary palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const PILL_TEAL: Color = Color::Rgb(45, 212, 191); // #2dd4bf
pub const MINT_GREEN: Color = Color::Rgb(110, 231, 183); // #6ee7b7
pub const AMBER: Color = Color::Rgb(251, 191, 36); // #fbbf24
pub const ERROR_RED: Color = Color::Rgb(248, 113, 113); // #f87171

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(201, 206, 214); // #c9ced6
pub const BORDER_GRAY: Color = Color::Rgb(92, 103, 115); // #5c6773
pub const BG_HIGHLIGHT: Color = Color::Rgb(31, 41, 55); // #1f2937
pub const BG_DARK: Color = Color::Rgb(17, 24, 39); // #111827
pub const LIGHT_BLUE: Color = Color::Rgb(125, 211, 252); // #7dd3fc

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(PILL_TEAL).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(MINT_GREEN)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(PILL_TEAL)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(MINT_GREEN)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Error text in panels and banners.
pub fn error_text() -> Style {
    Style::default().fg(ERROR_RED)
}

/// Non-blocking error banner above still-valid data.
pub fn error_banner() -> Style {
    Style::default()
        .fg(ERROR_RED)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(PILL_TEAL).add_modifier(Modifier::BOLD)
}
