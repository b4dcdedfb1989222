//! Terminal display and input handling.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, BufWriter, Stdout, Write, stdout};
use std::time::{Duration, Instant};

/// Terminal display handler with buffered output.
///
/// Owns all I/O: the render core hands it serialized frames and never
/// touches the terminal itself.
pub struct TerminalDisplay {
    width: u16,
    height: u16,
    last_resize_check: Instant,
    buffer: BufWriter<Stdout>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        let (width, height) = terminal::size()?;
        let adjusted_height = height.saturating_sub(2); // leave room for the status line

        Ok(Self {
            width,
            height: adjusted_height,
            last_resize_check: Instant::now(),
            buffer: BufWriter::new(stdout),
        })
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }

    /// Check if the terminal has been resized since the last check.
    pub fn check_resize(&mut self) -> bool {
        if self.last_resize_check.elapsed() < Duration::from_millis(100) {
            return false;
        }
        self.last_resize_check = Instant::now();

        if let Ok((new_width, new_height)) = terminal::size() {
            let new_height = new_height.saturating_sub(2);
            if new_width != self.width || new_height != self.height {
                self.width = new_width;
                self.height = new_height;
                return true;
            }
        }
        false
    }

    /// Draw a serialized frame with line-by-line cursor positioning and a
    /// status line below it.
    pub fn present(&mut self, frame: &str, status: &str) -> io::Result<()> {
        // hide cursor and disable line wrap while drawing
        write!(self.buffer, "\x1b[?25l\x1b[?7l")?;

        let mut rows = 0;
        for (i, line) in frame.lines().enumerate() {
            write!(self.buffer, "\x1b[{};1H{}", i + 1, line)?;
            rows = i + 1;
        }

        // clear leftovers from larger frames, then the status line
        write!(self.buffer, "\x1b[J")?;
        write!(self.buffer, "\x1b[{};1H\x1b[K{}", rows + 1, status)?;

        write!(self.buffer, "\x1b[?7h")?;
        self.buffer.flush()
    }

    /// Check for keyboard input.
    pub fn poll_input(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                return Ok(Some(key_event));
            }
        }
        Ok(None)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = self.buffer.flush();
        let _ = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
    }
}

/// Key actions for the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Pause,
    Reset,
}

/// Parse keyboard input into actions.
pub fn parse_key_event(event: KeyEvent) -> Action {
    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') => Action::Pause,
        KeyCode::Char('r') => Action::Reset,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_parse_key_event_quit() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::Quit);
    }

    #[test]
    fn test_parse_key_event_escape() {
        let event = KeyEvent::new(KeyCode::Esc, KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::Quit);
    }

    #[test]
    fn test_parse_key_event_pause() {
        let event = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::Pause);
    }

    #[test]
    fn test_parse_key_event_reset() {
        let event = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::Reset);
    }

    #[test]
    fn test_parse_key_event_none() {
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::None);
    }
}
