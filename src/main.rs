//! Olomtui — one-row otimono falling-block puzzle game in the terminal.

mod app;
mod game;
mod input;
mod pieces;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use pieces::{PatternGen, PieceGen, RandomGen, parse_pattern};

/// Options derived from CLI that the game loop and engine consume.
#[derive(Debug)]
pub struct GameConfig {
    pub piece_gen: PieceGen,
    pub mode_label: String,
    pub tick_ms: u64,
    pub palette: Palette,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (piece_gen, mode_label) = match args.piece_pattern.as_deref() {
        Some(pattern) => {
            let pieces = parse_pattern(pattern)
                .with_context(|| format!("invalid --piece-pattern {pattern:?}"))?;
            (PieceGen::Pattern(PatternGen::new(pieces)), "pat".to_owned())
        }
        None => {
            let seed = args.seed.unwrap_or_else(seed_from_time);
            (PieceGen::Random(RandomGen::new(seed)), String::new())
        }
    };
    let config = GameConfig {
        piece_gen,
        mode_label,
        tick_ms: args.tick_ms,
        palette: args.palette,
    };
    let mut app = App::new(config);
    app.run()
}

/// Seed for unseeded runs; only needs to differ between launches.
fn seed_from_time() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

/// One-row otimono puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "olomtui",
    version,
    about = "One-row otimono falling-block puzzle in the terminal. Stack figure values; runs of 4+ equal columns clear for score.",
    long_about = "Olomtui is a terminal puzzle game played on a single row of 10 columns.\n\n\
        Pieces of stacked blocks fall column-wise. When a piece lands, its counts merge \
        into the field; any run of 4 or more equal column values clears for score (wider \
        runs score cubically more), and the whole field settles by one. The game ends when \
        a column reaches height 11.\n\n\
        CONTROLS:\n  Left/a/h   Move left   Right/d/l  Move right\n  Down/s/j   Drop        q / Esc    Quit"
)]
pub struct Args {
    /// Piece pattern, e.g. "202,112": comma-separated pieces, one digit per
    /// column. Replaces the random generator and shows a "pat" mode label.
    #[arg(short = 'p', long, value_name = "PATTERN")]
    pub piece_pattern: Option<String>,

    /// RNG seed for the random generator (default: derived from the clock).
    #[arg(long, value_name = "N")]
    pub seed: Option<u32>,

    /// Frame interval in milliseconds. Pieces descend every 5th frame.
    #[arg(long, default_value = "200", value_name = "MS")]
    pub tick_ms: u64,

    /// Colour palette: normal (green piece, blue preview) or mono.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,
    Mono,
}
