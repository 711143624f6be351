//! Parrot/neon theme tokens for the TickerDash TUI
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, close price, MACD line)
//! - **Positive**: Neon green (up moves, oversold RSI zone)
//! - **Negative**: Hot pink (down moves, overbought RSI zone, errors)
//! - **Warning**: Neon orange (no-data notices, slow SMA)
//! - **Neutral**: Cool purple (fast SMA, signal line)
//! - **Muted**: Steel blue (labels, axes, hints)

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

/// RSI guide levels.
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Up moves green, down moves pink, unchanged secondary.
pub fn change_color(delta: f64) -> Color {
    if delta > 0.0 {
        POSITIVE
    } else if delta < 0.0 {
        NEGATIVE
    } else {
        TEXT_SECONDARY
    }
}

/// Overbought pink, oversold green, otherwise neutral.
pub fn rsi_color(value: f64) -> Color {
    if value >= RSI_OVERBOUGHT {
        NEGATIVE
    } else if value <= RSI_OVERSOLD {
        POSITIVE
    } else {
        NEUTRAL
    }
}
