//! App: terminal init, main loop, tick and key handling.

use crate::GameConfig;
use crate::game::{GameState, Message};
use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;

pub struct App {
    theme: Theme,
    mode_label: String,
    tick_interval: Duration,
    state: GameState,
    message: Option<Message>,
    clock: u64,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let theme = Theme::for_palette(config.palette);
        Self {
            theme,
            mode_label: config.mode_label,
            tick_interval: Duration::from_millis(config.tick_ms),
            state: GameState::new(config.piece_gen),
            message: None,
            clock: 0,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{
                EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
            },
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    /// Block up to one frame interval for a key press; a timeout or a
    /// non-key event counts as "no key" and the tick proceeds anyway.
    fn poll_action(&self) -> Result<Action> {
        if event::poll(self.tick_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key_to_action(key));
                }
            }
        }
        Ok(Action::None)
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|f| {
                ui::draw(
                    f,
                    &self.state,
                    self.message.as_ref(),
                    &self.mode_label,
                    &self.theme,
                    false,
                )
            })?;

            if self.state.field.is_game_over() {
                break;
            }

            self.clock += 1;
            let action = self.poll_action()?;
            if action == Action::Quit {
                return Ok(());
            }

            self.message = self.message.take().and_then(Message::decay);
            if let Some(m) = self.state.tick(action, self.clock) {
                self.message = Some(m);
            }
        }

        // Game over: the engine is frozen; keep drawing grayscale, let any
        // live message run out its timer, and wait for quit.
        let grayscale = Theme::grayscale();
        loop {
            terminal.draw(|f| {
                ui::draw(
                    f,
                    &self.state,
                    self.message.as_ref(),
                    &self.mode_label,
                    &grayscale,
                    true,
                )
            })?;

            self.message = self.message.take().and_then(Message::decay);
            if self.poll_action()? == Action::Quit {
                return Ok(());
            }
        }
    }
}
