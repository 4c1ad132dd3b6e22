use anyhow::Result;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Board, Cell, Symbol};

/// A move-selection policy.
///
/// A strategy inspects the board and proposes a cell. `None`, an out-of-range
/// index or an occupied cell all mean "no usable move"; the game loop falls
/// back to the first empty cell in that case.
pub(crate) trait Strategy {
    fn determine_move(&mut self, board: &Board) -> Result<Option<usize>>;

    fn name(&self) -> &str;

    fn is_human(&self) -> bool {
        false
    }
}

/// Picks uniformly among the empty cells.
pub(crate) struct RandomAi {
    rng: StdRng,
}

impl RandomAi {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomAi {
    fn determine_move(&mut self, board: &Board) -> Result<Option<usize>> {
        let empty: Vec<usize> = board
            .snapshot()
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
            .collect();
        Ok(empty.choose(&mut self.rng).copied())
    }

    fn name(&self) -> &str {
        "Random AI"
    }
}

/// Wins if it can, blocks if it must, otherwise takes the first empty cell.
pub(crate) struct GreedyAi {
    symbol: Symbol,
}

impl GreedyAi {
    pub fn new(symbol: Symbol) -> Self {
        Self { symbol }
    }

    fn completing_move(board: &mut Board, symbol: Symbol) -> Option<usize> {
        board.available_moves().into_iter().find(|&index| {
            board.apply_move(index, symbol);
            let wins = board.check_win();
            board.undo_move(index);
            wins
        })
    }
}

impl Strategy for GreedyAi {
    fn determine_move(&mut self, board: &Board) -> Result<Option<usize>> {
        let mut board = board.clone();
        if let Some(index) = Self::completing_move(&mut board, self.symbol) {
            debug!("{} goes for the win at {}", self.symbol, index);
            return Ok(Some(index));
        }
        if let Some(index) = Self::completing_move(&mut board, self.symbol.opponent()) {
            debug!("{} blocks the opponent at {}", self.symbol, index);
            return Ok(Some(index));
        }
        Ok(board.first_available())
    }

    fn name(&self) -> &str {
        "Greedy AI"
    }
}
