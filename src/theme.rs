//! Colour selection for the status row, plus the grayscale game-over variant.

use crate::Palette;
use ratatui::style::Color;

/// Heights at or above this render bold, mirroring the "almost full" warning.
pub const BOLD_THRESHOLD: u8 = 7;

/// Colours for the three roles the row distinguishes: settled field, the
/// falling piece overlay, and the queue preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub field_fg: Color,
    pub active: Color,
    pub next: Color,
    pub text: Color,
}

impl Theme {
    pub fn for_palette(palette: Palette) -> Self {
        match palette {
            Palette::Normal => Self {
                field_fg: Color::Reset,
                active: Color::Green,
                next: Color::Blue,
                text: Color::Reset,
            },
            Palette::Mono => Self::grayscale(),
        }
    }

    /// Everything in the terminal default colour; used for the frozen
    /// game-over screen and the mono palette.
    pub fn grayscale() -> Self {
        Self {
            field_fg: Color::Reset,
            active: Color::Reset,
            next: Color::Reset,
            text: Color::Reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_palette_matches_grayscale() {
        assert_eq!(Theme::for_palette(Palette::Mono), Theme::grayscale());
    }
}
