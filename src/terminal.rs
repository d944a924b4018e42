//! Raw-mode terminal I/O
//!
//! The thin layer between the simulation and the terminal: raw-mode
//! setup/teardown, bounded-timeout key polling and row-major frame
//! rasterization. The screen guard restores the terminal on drop, so an
//! interrupt or panic never leaves the shell in raw mode.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use thiserror::Error;

use crate::render::Compositor;

/// Terminal layer errors
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What a bounded poll observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(char),
    /// New (rows, cols)
    Resize(u16, u16),
    /// Ctrl-C
    Interrupt,
    None,
}

/// Raw-mode screen session
pub struct Screen {
    active: bool,
}

impl Screen {
    /// Enter the alternate screen in raw mode with the cursor hidden.
    pub fn init() -> Result<Self, TerminalError> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    /// Current terminal size as (rows, cols).
    pub fn size() -> Result<(u16, u16), TerminalError> {
        let (cols, rows) = terminal::size()?;
        Ok((rows, cols))
    }

    /// Wait up to `timeout` for input. Returns within the timeout whether
    /// or not a key arrives; resize events are surfaced so the caller can
    /// rebuild its frame dimensions.
    pub fn poll(&mut self, timeout: Duration) -> Result<Input, TerminalError> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers,
                    ..
                }) if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(Input::Interrupt);
                }
                Event::Key(KeyEvent {
                    code: KeyCode::Char(c),
                    ..
                }) => return Ok(Input::Key(c)),
                Event::Resize(cols, rows) => return Ok(Input::Resize(rows, cols)),
                _ => {}
            }
        }
        Ok(Input::None)
    }

    /// Draw one full frame row-major, repositioning the cursor in place.
    pub fn draw(&mut self, rows: i32, cols: i32, frame: &Compositor) -> Result<(), TerminalError> {
        let mut stdout = io::stdout();
        let mut line = String::with_capacity(cols.max(0) as usize);
        for row in 0..rows {
            line.clear();
            for col in 0..cols {
                line.push(frame.sample(row, col));
            }
            queue!(stdout, MoveTo(0, row as u16), Print(&line))?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Restore cooked mode, the cursor and the main screen.
    pub fn cleanup(&mut self) -> Result<(), TerminalError> {
        if self.active {
            self.active = false;
            let _ = terminal::disable_raw_mode();
            execute!(io::stdout(), Show, LeaveAlternateScreen)?;
        }
        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
