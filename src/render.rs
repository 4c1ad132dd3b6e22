use std::io::Write;

use anyhow::Result;

use crate::board::Board;

/// Shows the game to whoever is watching.
pub(crate) trait Renderer {
    fn render(&mut self, board: &Board) -> Result<()>;

    fn announce(&mut self, message: &str) -> Result<()>;

    /// Shown even when regular output is switched off.
    fn warn(&mut self, message: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DisplayConfig {
    pub show: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { show: true }
    }
}

/// Draws the board as text rows with `|` dividers and `---` separators.
pub(crate) struct TextRenderer<W> {
    out: W,
    config: DisplayConfig,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, config: DisplayConfig) -> Self {
        Self { out, config }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, board: &Board) -> Result<()> {
        if self.config.show {
            write!(self.out, "{}\n\n", board)?;
        }
        Ok(())
    }

    fn announce(&mut self, message: &str) -> Result<()> {
        if self.config.show {
            writeln!(self.out, "{}", message)?;
        }
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) struct NoopRenderer;

#[cfg(test)]
impl Renderer for NoopRenderer {
    fn render(&mut self, _board: &Board) -> Result<()> {
        Ok(())
    }

    fn announce(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn warn(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }
}
