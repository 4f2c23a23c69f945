use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableBracketedPaste, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;

/// Optional "lock the learner in" capability of a presentation layer
pub trait KioskLock {
    fn engage(&mut self) -> io::Result<()>;
    fn release(&mut self) -> io::Result<()>;
}

/// Full-screen terminal lock: raw mode keeps the terminal from turning
/// Ctrl+C/Ctrl+Z into signals, the alternate screen hides the shell.
pub struct TerminalLock<W: Write> {
    out: W,
    engaged: bool,
}

impl<W: Write> TerminalLock<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            engaged: false,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }
}

impl<W: Write> KioskLock for TerminalLock<W> {
    fn engage(&mut self) -> io::Result<()> {
        if self.engaged {
            return Ok(());
        }
        enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, DisableBracketedPaste, Hide)?;
        self.engaged = true;
        debug!("terminal lock engaged");
        Ok(())
    }

    fn release(&mut self) -> io::Result<()> {
        if !self.engaged {
            return Ok(());
        }
        self.engaged = false;
        disable_raw_mode()?;
        execute!(self.out, Show, LeaveAlternateScreen)?;
        debug!("terminal lock released");
        Ok(())
    }
}

impl<W: Write> Drop for TerminalLock<W> {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// For headless runs and tests
#[derive(Debug, Default)]
pub struct NoLock;

impl KioskLock for NoLock {
    fn engage(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn release(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Keys that would normally close or suspend the program
pub fn is_close_attempt(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::F(4) => key.modifiers.contains(KeyModifiers::ALT),
        KeyCode::Char(c) => {
            key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(c.to_ascii_lowercase(), 'c' | 'd' | 'q' | 'w' | 'z')
        }
        _ => false,
    }
}

/// Copy, cut and paste shortcuts, swallowed by the answer box
pub fn is_clipboard_shortcut(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => {
            key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(c.to_ascii_lowercase(), 'c' | 'v' | 'x')
        }
        KeyCode::Insert => key
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::CONTROL),
        _ => false,
    }
}
