use crate::domain::model::DisplayState;
use crate::domain::ports::CountDisplay;
use crate::utils::error::Result;
use crate::utils::format::group_thousands;
use std::io::{self, IsTerminal, Stdout, Write};

/// 在終端機上畫出訪客數。`inline` 模式下每一格都覆寫同一行。
pub struct TerminalDisplay<W: Write + Send> {
    writer: W,
    label: String,
    inline: bool,
    last: Option<DisplayState>,
}

impl TerminalDisplay<Stdout> {
    /// Inline redraw on a TTY, one line per state otherwise.
    pub fn stdout(label: impl Into<String>) -> Self {
        let inline = io::stdout().is_terminal();
        Self::new(io::stdout(), label, inline)
    }
}

impl<W: Write + Send> TerminalDisplay<W> {
    pub fn new(writer: W, label: impl Into<String>, inline: bool) -> Self {
        Self {
            writer,
            label: label.into(),
            inline,
            last: None,
        }
    }

    pub fn text_for(state: DisplayState) -> String {
        match state {
            DisplayState::Loading => DisplayState::LOADING_LABEL.to_string(),
            DisplayState::Count(count) => group_thousands(count.value()),
            DisplayState::Error => DisplayState::ERROR_LABEL.to_string(),
        }
    }

    /// Ends the inline line so later output starts on a fresh one.
    pub fn finish(&mut self) -> Result<()> {
        if self.inline && self.last.is_some() {
            writeln!(self.writer)?;
            self.writer.flush()?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> CountDisplay for TerminalDisplay<W> {
    fn render(&mut self, state: DisplayState) -> Result<()> {
        if self.last == Some(state) {
            return Ok(());
        }

        let text = Self::text_for(state);
        if self.inline {
            write!(self.writer, "\r\x1b[2K{}: {}", self.label, text)?;
        } else {
            writeln!(self.writer, "{}: {}", self.label, text)?;
        }
        self.writer.flush()?;

        self.last = Some(state);
        Ok(())
    }
}
