use std::num::NonZeroUsize;

use anyhow::Result;
use log::debug;

use crate::board::{Board, Cell, Symbol, WIN_LINES};
use crate::strategy::Strategy;

/// Terminal score of a won game in depth-limited mode, large enough to
/// dominate any heuristic evaluation.
const LIMITED_WIN_SCORE: i32 = 100;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SearchStats {
    pub nodes: usize,
    pub max_depth: usize,
}

/// Exhaustive adversarial search.
///
/// Candidates are visited in ascending index order and only a strictly better
/// score replaces the current best, so ties go to the lowest index.
pub(crate) struct Minimax {
    symbol: Symbol,
    opponent: Symbol,
    depth_limit: Option<NonZeroUsize>,
    stats: SearchStats,
}

impl Minimax {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            opponent: symbol.opponent(),
            depth_limit: None,
            stats: SearchStats::default(),
        }
    }

    /// Stops searching at `depth` plies and scores the board heuristically.
    pub fn with_depth_limit(symbol: Symbol, depth: NonZeroUsize) -> Self {
        Self {
            depth_limit: Some(depth),
            ..Self::new(symbol)
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn win_score(&self) -> i32 {
        match self.depth_limit {
            Some(_) => LIMITED_WIN_SCORE,
            None => 1,
        }
    }

    /// Returns the score of `board` for the searching side and the move that
    /// achieves it. `board` is restored before returning.
    pub fn minimax(&mut self, board: &mut Board, maximizing: bool, depth: usize) -> (i32, Option<usize>) {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        // A completed line belongs to whoever moved last, which is the side
        // not on the move at this node.
        if board.check_win() {
            let score = if maximizing { -self.win_score() } else { self.win_score() };
            return (score, None);
        }
        if board.is_full() {
            return (0, None);
        }
        if self.depth_limit.is_some_and(|limit| depth >= limit.get()) {
            return (self.evaluate(board), None);
        }

        let (symbol, mut best_score) = if maximizing {
            (self.symbol, i32::MIN)
        } else {
            (self.opponent, i32::MAX)
        };
        let mut best_move = None;
        for index in board.available_moves() {
            board.apply_move(index, symbol);
            let (score, _) = self.minimax(board, !maximizing, depth + 1);
            board.undo_move(index);

            let improves = if maximizing { score > best_score } else { score < best_score };
            if improves {
                best_score = score;
                best_move = Some(index);
            }
        }
        (best_score, best_move)
    }

    /// Line heuristic from the searching side's point of view.
    fn evaluate(&self, board: &Board) -> i32 {
        WIN_LINES
            .iter()
            .map(|line| {
                let count = |symbol| {
                    line.iter()
                        .filter(|&&i| board.cell(i) == Cell::Filled(symbol))
                        .count()
                };
                let (own, theirs) = (count(self.symbol), count(self.opponent));
                match (own, theirs) {
                    (2, 0) => 10,
                    (1, 0) => 1,
                    (0, 2) => -10,
                    (0, 1) => -1,
                    _ => 0,
                }
            })
            .sum()
    }
}

impl Strategy for Minimax {
    fn determine_move(&mut self, board: &Board) -> Result<Option<usize>> {
        self.stats = SearchStats::default();
        let mut board = board.clone();
        let (score, best_move) = self.minimax(&mut board, true, 0);
        let stats = self.stats();
        debug!(
            "{} minimax: move {:?} score {} after {} nodes, max depth {}",
            self.symbol, best_move, score, stats.nodes, stats.max_depth
        );
        Ok(best_move)
    }

    fn name(&self) -> &str {
        "Minimax AI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best_move(symbol: Symbol, board: &str) -> Option<usize> {
        let board: Board = board.parse().unwrap();
        Minimax::new(symbol).determine_move(&board).unwrap()
    }

    #[test]
    fn test_takes_the_win() {
        assert_eq!(best_move(Symbol::X, "XX__O___O"), Some(2));
    }

    #[test]
    fn test_blocks_the_only_threat() {
        assert_eq!(best_move(Symbol::O, "XX__O____"), Some(2));
    }

    #[test]
    fn test_forced_win_ties_break_to_lowest_index() {
        // O wins at 3 right away, but O at 2 blocks and forks 3 and 6, which
        // also wins. Minimax does not prefer faster wins, so 2 comes first.
        assert_eq!(best_move(Symbol::O, "XX__OO__X"), Some(2));
    }

    #[test]
    fn test_immediate_win_over_losing_block() {
        // Blocking at 2 hands X the column 0-3-6.
        assert_eq!(best_move(Symbol::O, "XX__OOX__"), Some(3));
    }

    #[test]
    fn test_empty_board_ties_break_to_lowest_index() {
        assert_eq!(best_move(Symbol::X, "_________"), Some(0));
    }

    #[test]
    fn test_terminal_boards_have_no_move() {
        assert_eq!(best_move(Symbol::O, "XXXOO____"), None);
        assert_eq!(best_move(Symbol::X, "XOXXOOOXX"), None);
    }

    #[test]
    fn test_scores() {
        let mut board: Board = "XX__O___O".parse().unwrap();
        let mut search = Minimax::new(Symbol::X);
        assert_eq!(search.minimax(&mut board, true, 0), (1, Some(2)));

        let mut board: Board = "_________".parse().unwrap();
        assert_eq!(search.minimax(&mut board, true, 0), (0, Some(0)));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board: Board = "X___O____".parse().unwrap();
        let before = board.clone();
        Minimax::new(Symbol::X).determine_move(&board).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_stats_reset_per_search() {
        let board: Board = "XOXOX____".parse().unwrap();
        let mut ai = Minimax::new(Symbol::O);
        ai.determine_move(&board).unwrap();
        let first = ai.stats();
        assert!(first.nodes > 1);
        assert!(first.max_depth <= 4);

        ai.determine_move(&board).unwrap();
        assert_eq!(ai.stats(), first);
    }

    #[test]
    fn test_depth_limited_still_sees_immediate_win() {
        let board: Board = "XX__O___O".parse().unwrap();
        let mut ai = Minimax::with_depth_limit(Symbol::X, NonZeroUsize::new(1).unwrap());
        assert_eq!(ai.determine_move(&board).unwrap(), Some(2));
        assert!(ai.stats().max_depth <= 1);
    }

    #[test]
    fn test_evaluate() {
        let ai = Minimax::new(Symbol::X);
        assert_eq!(ai.evaluate(&Board::new()), 0);
        // Centre X touches 4 lines.
        let board: Board = "____X____".parse().unwrap();
        assert_eq!(ai.evaluate(&board), 4);
        // Top row +10, left column +1, middle row and anti-diagonal -1 each.
        let board: Board = "XX__O____".parse().unwrap();
        assert_eq!(ai.evaluate(&board), 9);
    }
}
