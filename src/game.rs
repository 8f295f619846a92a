//! Game state: one-row field, piece queue, run clearing, scoring, tick machine.

use crate::input::Action;
use crate::pieces::{Piece, PieceGen};
use std::fmt::Write;

/// Width of the game field in columns.
pub const FIELD_WIDTH: usize = 10;

/// Minimum width of an equal-value run for it to clear.
pub const MIN_RUN_WIDTH: usize = 4;

/// Any column reaching this height ends the game.
pub const GAME_OVER_HEIGHT: u8 = 11;

/// Frames a score message stays on screen.
pub const MESSAGE_FRAMES: u8 = 15;

/// Drop countdown a fresh game starts with.
const DROP_START: u8 = 9;

/// The drop countdown never speeds up past this floor.
const DROP_FLOOR: u8 = 5;

/// Every this many dropped pieces, the drop countdown shrinks by one.
const SPEEDUP_EVERY: u32 = 80;

/// Pieces descend only on every FALL_GATE-th tick; input applies every tick.
const FALL_GATE: u64 = 5;

/// The field: a stack height per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    cols: [u8; FIELD_WIDTH],
}

impl Field {
    pub fn new() -> Self {
        Self {
            cols: [0; FIELD_WIDTH],
        }
    }

    #[inline]
    pub fn height(&self, c: usize) -> u8 {
        self.cols[c]
    }

    #[inline]
    pub fn heights(&self) -> &[u8; FIELD_WIDTH] {
        &self.cols
    }

    /// Leftmost maximal run of equal, positive heights at least `min_len`
    /// wide. Returns the half-open column interval, or None.
    pub fn find_run(&self, min_len: usize) -> Option<(usize, usize)> {
        if min_len == 0 || min_len > FIELD_WIDTH {
            return None;
        }
        for c in 0..=(FIELD_WIDTH - min_len) {
            let v = self.cols[c];
            if v == 0 {
                continue;
            }
            let mut d = c + 1;
            while d < FIELD_WIDTH && self.cols[d] == v {
                d += 1;
            }
            if d - c >= min_len {
                return Some((c, d));
            }
        }
        None
    }

    /// True once any column has stacked up to [`GAME_OVER_HEIGHT`].
    pub fn is_game_over(&self) -> bool {
        self.cols.iter().any(|&v| v >= GAME_OVER_HEIGHT)
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient score feedback shown instead of the score readout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    frames_left: u8,
}

impl Message {
    pub fn new(text: String) -> Self {
        Self {
            text,
            frames_left: MESSAGE_FRAMES,
        }
    }

    /// One displayed frame has passed; None once the lifetime is used up.
    pub fn decay(mut self) -> Option<Self> {
        self.frames_left -= 1;
        (self.frames_left > 0).then_some(self)
    }
}

/// Whole mutable game state. [`GameState::tick`] is the sole mutator; the
/// renderer reads the public fields and never writes.
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Field,
    /// Slot 0 is the falling piece (None between commit and reload),
    /// slots 1 and 2 are the preview.
    pub queue: [Option<Piece>; 3],
    /// Leftmost field column covered by the active piece.
    pub piece_col: usize,
    /// Countdown to the bottom; 0 means the piece has landed.
    pub piece_pos: u8,
    pub score: u32,
    /// Countdown value freshly reloaded pieces start from.
    pub drop_pos: u8,
    pub pieces_dropped: u32,
    piece_gen: PieceGen,
}

impl GameState {
    pub fn new(mut piece_gen: PieceGen) -> Self {
        let queue = [
            Some(piece_gen.next_piece()),
            Some(piece_gen.next_piece()),
            Some(piece_gen.next_piece()),
        ];
        Self {
            field: Field::new(),
            queue,
            piece_col: 0,
            piece_pos: DROP_START,
            score: 0,
            drop_pos: DROP_START,
            pieces_dropped: 0,
            piece_gen,
        }
    }

    /// Advance one tick. Movement keys apply immediately (clamped at the
    /// walls); descent, landing and reload only fire on gated ticks.
    /// Returns a message when the landing cleared at least one run.
    pub fn tick(&mut self, action: Action, clock: u64) -> Option<Message> {
        if let Some(piece) = &self.queue[0] {
            match action {
                Action::MoveLeft if self.piece_col > 0 => self.piece_col -= 1,
                Action::MoveRight if self.piece_col + piece.len() < FIELD_WIDTH => {
                    self.piece_col += 1;
                }
                Action::Drop => self.piece_pos = 0,
                _ => {}
            }
        }

        let mut message = None;
        if clock % FALL_GATE == 0 {
            if self.queue[0].is_none() {
                self.reload();
            } else if self.piece_pos == 0 {
                self.commit_piece();
                message = self.clear_runs();
                self.queue[0] = None;
                self.pieces_dropped += 1;
                if self.pieces_dropped % SPEEDUP_EVERY == 0 && self.drop_pos > DROP_FLOOR {
                    self.drop_pos -= 1;
                }
            } else {
                self.piece_pos -= 1;
            }
        }
        message
    }

    /// Shift the queue down and generate a fresh piece at the back.
    fn reload(&mut self) {
        self.queue.rotate_left(1);
        self.queue[2] = Some(self.piece_gen.next_piece());
        self.piece_col = 0;
        self.piece_pos = self.drop_pos;
    }

    /// Merge the landed piece's block counts into the field. Pattern pieces
    /// may be wider than the field; columns past the right edge are dropped.
    fn commit_piece(&mut self) {
        if let Some(piece) = &self.queue[0] {
            let span = FIELD_WIDTH - self.piece_col;
            for (i, &count) in piece.cells().iter().take(span).enumerate() {
                self.field.cols[self.piece_col + i] += count;
            }
        }
    }

    /// Clear qualifying runs until none remain, then settle the field.
    ///
    /// Each cleared run drops its columns to exactly 0 and awards
    /// `value * (width - MIN_RUN_WIDTH + 1)^3`. The settle is a single
    /// one-unit decrement of every nonzero column per pass, no matter how
    /// many runs cleared.
    fn clear_runs(&mut self) -> Option<Message> {
        let mut text = String::new();
        while let Some((start, end)) = self.field.find_run(MIN_RUN_WIDTH) {
            let value = u32::from(self.field.cols[start]);
            for col in &mut self.field.cols[start..end] {
                *col = 0;
            }
            let width = (end - start - MIN_RUN_WIDTH + 1) as u32;
            let gain = value * width.pow(3);
            self.score += gain;
            if !text.is_empty() {
                text.push(' ');
            }
            let _ = write!(text, "+{gain}");
        }
        if text.is_empty() {
            return None;
        }
        for col in &mut self.field.cols {
            if *col > 0 {
                *col -= 1;
            }
        }
        Some(Message::new(text))
    }
}
