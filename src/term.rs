use crate::TermInt;
use std::{io::{self, Stdout, Write, stdout}, time::{Duration, Instant}};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEventKind, read, poll};
use log::{debug, warn};

use crate::keys::LogicalKey;

/// Bytes for one frame. Filled by the renderer, written in one go by
/// [`TermManager::write_frame`] and dropped afterwards.
#[derive(Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        FrameBuffer { buf: Vec::with_capacity(capacity) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl Write for FrameBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Owns the terminal while the game runs: raw mode, alternate screen and
/// cursor visibility are switched on by [`setup`](Self::setup) and always
/// switched back, at the latest when the manager is dropped.
pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), active: false }
    }

    pub fn setup(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("Error entering raw mode")?;
        self.active = true;

        execute!(
            self.stdout,
            EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )
        .context("Error preparing the screen")?;

        debug!("terminal in raw mode");
        Ok(())
    }

    /// Undo [`setup`](Self::setup). Every step is attempted even if an
    /// earlier one fails; the first failure is returned.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let screen = execute!(self.stdout, cursor::Show, LeaveAlternateScreen)
            .context("Error restoring the screen");
        let raw = terminal::disable_raw_mode().context("Error leaving raw mode");

        debug!("terminal restored");
        screen.and(raw)
    }

    /// `(rows, cols)` of the terminal window.
    pub fn get_terminal_size(&self) -> Result<(TermInt, TermInt)> {
        let (cols, rows) = terminal::size().context("Error reading size")?;
        Ok((rows, cols))
    }

    /// Waits up to `timeout` for a key press. Other events and key releases
    /// are skipped; interrupted reads are retried until the time is up.
    pub fn read_key(&self, timeout: Duration) -> Result<Option<LogicalKey>> {
        let deadline = Instant::now() + timeout;

        loop {
            let left = deadline.saturating_duration_since(Instant::now());

            match poll(left) {
                Ok(true) => {}
                Ok(false) => return Ok(None),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("Error polling for input"),
            }

            match read() {
                Ok(Event::Key(ev)) if ev.kind == KeyEventKind::Press => {
                    return Ok(Some(LogicalKey::from(ev)));
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e).context("Error reading input"),
            }

            if left.is_zero() {
                return Ok(None);
            }
        }
    }

    pub fn write_frame(&mut self, frame: FrameBuffer) -> Result<()> {
        self.stdout
            .write_all(frame.as_bytes())
            .and_then(|_| self.stdout.flush())
            .context("Error writing frame")
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("{:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::queue;

    #[test]
    fn frame_buffer_accumulates_commands() {
        let mut frame = FrameBuffer::default();
        queue!(frame, cursor::MoveTo(0, 0)).unwrap();
        frame.write_all(b"hi").unwrap();

        assert_eq!(frame.as_bytes(), b"\x1b[1;1Hhi");
    }

    #[test]
    fn restore_without_setup_is_a_no_op() {
        let mut term = TermManager::new();
        assert!(term.restore().is_ok());
    }
}
