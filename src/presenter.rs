// Presenter: redraws the 3-line status block in place

use crossterm::cursor::MoveToPreviousLine;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;

/// Lines in one frame: adapter count, upload, download.
pub const FRAME_LINES: u16 = 3;

/// What gets shown for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub adapter_count: usize,
    pub down_text: String,
    pub up_text: String,
}

impl Frame {
    pub fn new(adapter_count: usize, down_text: impl Into<String>, up_text: impl Into<String>) -> Self {
        Self {
            adapter_count,
            down_text: down_text.into(),
            up_text: up_text.into(),
        }
    }
}

pub fn render_lines(frame: &Frame) -> [String; FRAME_LINES as usize] {
    [
        format!("Connected Adapters: {}", frame.adapter_count),
        format!("Upload Speed: {}", frame.up_text),
        format!("Download Speed: {}", frame.down_text),
    ]
}

/// Display surface. Implementations must clear the previous frame before drawing the next.
pub trait Presenter: Send {
    fn present(&mut self, frame: &Frame) -> std::io::Result<()>;
}

/// Writes frames to a terminal, moving the cursor back over the last frame first.
pub struct TerminalPresenter<W> {
    out: W,
    drawn: bool,
}

impl TerminalPresenter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, drawn: false }
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn present(&mut self, frame: &Frame) -> std::io::Result<()> {
        if self.drawn {
            queue!(
                self.out,
                MoveToPreviousLine(FRAME_LINES),
                Clear(ClearType::FromCursorDown)
            )?;
        }
        for line in render_lines(frame) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        self.drawn = true;
        Ok(())
    }
}
