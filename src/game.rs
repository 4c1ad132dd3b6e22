use std::fmt;

use anyhow::{bail, Result};
use log::{debug, info, warn};

use crate::board::{Board, Symbol};
use crate::render::Renderer;
use crate::strategy::Strategy;

pub(crate) struct Player {
    pub symbol: Symbol,
    pub strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new(symbol: Symbol, strategy: impl Strategy + 'static) -> Self {
        Self {
            symbol,
            strategy: Box::new(strategy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    InProgress,
    Win(Symbol),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "Game in progress"),
            Outcome::Win(symbol) => write!(f, "{} wins!", symbol),
            Outcome::Draw => write!(f, "It's a draw!"),
        }
    }
}

/// Turn controller: X and O alternate until a line is completed or the
/// board fills up.
pub(crate) struct Game {
    board: Board,
    players: [Player; 2],
    outcome: Outcome,
}

impl Game {
    pub fn new(players: [Player; 2]) -> Result<Self> {
        if players[0].symbol != Symbol::X || players[1].symbol != Symbol::O {
            bail!(
                "X must move first against O, got {} then {}",
                players[0].symbol,
                players[1].symbol
            );
        }
        Ok(Self {
            board: Board::new(),
            players,
            outcome: Outcome::InProgress,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
        self.outcome = Outcome::InProgress;
    }

    pub fn play(&mut self, renderer: &mut dyn Renderer) -> Result<Outcome> {
        if self.outcome != Outcome::InProgress {
            bail!("Game is already over ({}), reset it first", self.outcome);
        }
        info!(
            "Game starting: {} ({}) vs {} ({})",
            self.players[0].symbol,
            self.players[0].strategy.name(),
            self.players[1].symbol,
            self.players[1].strategy.name()
        );
        loop {
            for turn in 0..self.players.len() {
                renderer.render(&self.board)?;
                let symbol = self.players[turn].symbol;
                let index = self.next_move(turn, renderer)?;
                self.board.apply_move(index, symbol);
                debug!("{} plays {}", symbol, index);

                if self.board.check_win() {
                    self.outcome = Outcome::Win(symbol);
                } else if self.board.is_full() {
                    self.outcome = Outcome::Draw;
                } else {
                    continue;
                }
                renderer.render(&self.board)?;
                renderer.announce(&self.outcome.to_string())?;
                info!("Game over: {}", self.outcome);
                return Ok(self.outcome);
            }
        }
    }

    /// Asks the player's strategy for a move. An unusable suggestion is
    /// replaced by the first empty cell.
    fn next_move(&mut self, turn: usize, renderer: &mut dyn Renderer) -> Result<usize> {
        let player = &mut self.players[turn];
        if !player.strategy.is_human() {
            debug!("{}'s AI is thinking...", player.symbol);
        }
        let suggested = player.strategy.determine_move(&self.board)?;
        if let Some(index) = suggested.filter(|&index| self.board.is_valid_move(index)) {
            return Ok(index);
        }

        let Some(fallback) = self.board.first_available() else {
            bail!("No empty cell left for {}", player.symbol);
        };
        warn!(
            "{} suggested invalid move {:?}, playing {} instead",
            player.strategy.name(),
            suggested,
            fallback
        );
        renderer.warn(&format!(
            "Error: Invalid move suggested by {}'s AI. Defaulting to first available move.",
            player.symbol
        ))?;
        Ok(fallback)
    }
}
