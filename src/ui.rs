//! Drawing: the single status row (mode, queue preview, field with active
//! piece overlay, drop countdown, score or message) plus a help line.

use crate::game::{FIELD_WIDTH, GameState, Message};
use crate::pieces::PIECE_WIDTH;
use crate::theme::{BOLD_THRESHOLD, Theme};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Glyph for a value inside a piece or the active-piece overlay.
fn piece_glyph(v: u8) -> char {
    match v {
        0..=9 => (b'0' + v) as char,
        10 => 'X',
        _ => '*',
    }
}

/// Glyph for a settled field column; empty shows as a dot.
fn field_glyph(v: u8) -> char {
    match v {
        0 => '.',
        1..=9 => (b'0' + v) as char,
        10 => 'X',
        _ => '*',
    }
}

fn styled(c: char, theme_fg: ratatui::style::Color, bold: bool) -> Span<'static> {
    let mut style = Style::default().fg(theme_fg);
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(c.to_string(), style)
}

/// Build the status row. Layout follows the classic single-row display:
/// `[mode] [slot2] [slot1] <field> <pos>  <message or score>`.
fn status_line(
    state: &GameState,
    message: Option<&Message>,
    mode: &str,
    theme: &Theme,
) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    if !mode.is_empty() {
        spans.push(Span::styled(
            format!("{mode} "),
            Style::default().fg(theme.text),
        ));
    }

    // Preview: piece after next first, then next, each padded to PIECE_WIDTH.
    for i in [2, 1] {
        let Some(piece) = &state.queue[i] else {
            continue;
        };
        for &v in piece.cells() {
            spans.push(styled(piece_glyph(v), theme.next, false));
        }
        let pad = PIECE_WIDTH.saturating_sub(piece.len());
        spans.push(Span::raw(" ".repeat(pad + 1)));
    }

    // Field with the falling piece overlaid on its span of columns.
    for c in 0..FIELD_WIDTH {
        let overlay = state.queue[0].as_ref().and_then(|piece| {
            (state.piece_col <= c && c < state.piece_col + piece.len())
                .then(|| piece.count(c - state.piece_col))
        });
        match overlay {
            Some(count) => {
                let v = state.field.height(c) + count;
                spans.push(styled(piece_glyph(v), theme.active, v >= BOLD_THRESHOLD));
            }
            None => {
                let v = state.field.height(c);
                spans.push(styled(field_glyph(v), theme.field_fg, v >= BOLD_THRESHOLD));
            }
        }
    }

    // Drop countdown of the active piece.
    spans.push(Span::raw(" "));
    spans.push(styled(piece_glyph(state.piece_pos), theme.active, false));

    // Message takes precedence over the score readout while it lives.
    let tail = match message {
        Some(m) => format!("  {}", m.text),
        None => format!("  S: {}", state.score),
    };
    spans.push(Span::styled(tail, Style::default().fg(theme.text)));

    Line::from(spans)
}

pub fn draw(
    frame: &mut Frame,
    state: &GameState,
    message: Option<&Message>,
    mode: &str,
    theme: &Theme,
    game_over: bool,
) {
    let [top, _, bottom] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(status_line(state, message, mode, theme)),
        top,
    );

    let help = if game_over {
        "game over - q or Esc to quit"
    } else {
        "left/right or a/d move, down or s drop, q quits"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            help,
            Style::default().add_modifier(Modifier::DIM),
        ))),
        bottom,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Palette;
    use crate::pieces::{PatternGen, PieceGen, parse_pattern};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn glyph_tables_match_display_alphabet() {
        assert_eq!(field_glyph(0), '.');
        assert_eq!(field_glyph(7), '7');
        assert_eq!(field_glyph(10), 'X');
        assert_eq!(field_glyph(12), '*');
        assert_eq!(piece_glyph(0), '0');
        assert_eq!(piece_glyph(10), 'X');
        assert_eq!(piece_glyph(11), '*');
    }

    #[test]
    fn status_row_overlays_active_piece_on_field() {
        let pieces = parse_pattern("22,13,4").unwrap();
        let mut state = GameState::new(PieceGen::Pattern(PatternGen::new(pieces)));
        state.piece_col = 3;
        let theme = Theme::for_palette(Palette::Normal);
        let line = status_line(&state, None, "pat", &theme);
        // slot2 "4" padded, slot1 "13" padded, overlay of 22 at cols 3-4
        assert_eq!(line_text(&line), "pat 4   13  ...22..... 9  S: 0");
    }

    #[test]
    fn message_replaces_score_readout() {
        let pieces = parse_pattern("22").unwrap();
        let state = GameState::new(PieceGen::Pattern(PatternGen::new(pieces)));
        let theme = Theme::grayscale();
        let msg = Message::new("+16".into());
        let line = status_line(&state, Some(&msg), "", &theme);
        let text = line_text(&line);
        assert!(text.ends_with("  +16"));
        assert!(!text.contains("S:"));
    }
}
