use std::io::{self, Write};

use anyhow::{bail, Context, Result};

use crate::board::{Board, Symbol};
use crate::strategy::Strategy;

/// Where human moves come from.
pub(crate) trait Input {
    /// Shows `prompt` and reads one line. `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    fn notify(&mut self, message: &str) -> Result<()>;
}

/// Reads from stdin, writes prompts to stdout.
pub(crate) struct Console;

impl Input for Console {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line).context("Failed to read from stdin")?;
        Ok((read > 0).then_some(line))
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        println!("{}", message);
        Ok(())
    }
}

/// Asks the person at the keyboard until they name an empty cell.
pub(crate) struct Human<I> {
    symbol: Symbol,
    input: I,
}

impl<I: Input> Human<I> {
    pub fn new(symbol: Symbol, input: I) -> Self {
        Self { symbol, input }
    }
}

impl<I: Input> Strategy for Human<I> {
    fn determine_move(&mut self, board: &Board) -> Result<Option<usize>> {
        let prompt = format!("Enter your move for '{}' (0-8): ", self.symbol);
        loop {
            let Some(line) = self.input.read_line(&prompt)? else {
                bail!("Input closed while waiting for {}'s move", self.symbol);
            };
            match line.trim().parse::<usize>() {
                Ok(index) if board.is_valid_move(index) => return Ok(Some(index)),
                Ok(_) => self.input.notify("Invalid move. Try again.")?,
                Err(_) => self.input.notify("Please enter a number.")?,
            }
        }
    }

    fn name(&self) -> &str {
        "Human Player"
    }

    fn is_human(&self) -> bool {
        true
    }
}
