use std::fmt;

use anyhow::Result;
use log::{debug, info};

use crate::game::{Game, Outcome, Player};
use crate::render::Renderer;

/// Results of repeated games between the same two players.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Tally {
    pub games: u32,
    pub wins: [u32; 2],
    pub ties: u32,
    pub labels: [(String, String); 2],
}

impl Tally {
    fn percent(&self, count: u32) -> u32 {
        if self.games == 0 {
            return 0;
        }
        (f64::from(count) * 100.0 / f64::from(self.games)).round() as u32
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "RESULTS - {} games played -", self.games)?;
        for (n, ((symbol, strategy), wins)) in self.labels.iter().zip(self.wins).enumerate() {
            writeln!(
                f,
                "Player {}: {} {}%   Sym = {}  Strat = {}",
                n + 1,
                wins,
                self.percent(wins),
                symbol,
                strategy
            )?;
        }
        writeln!(f, "Ties    : {} {}%", self.ties, self.percent(self.ties))
    }
}

/// Plays `games` games in a row, clearing the board between them.
pub(crate) fn play_series(game: &mut Game, renderer: &mut dyn Renderer, games: u32) -> Result<Tally> {
    let label = |player: &Player| (player.symbol.to_string(), player.strategy.name().to_string());
    let [first, second] = game.players();
    let mut tally = Tally {
        labels: [label(first), label(second)],
        ..Tally::default()
    };
    for number in 1..=games {
        game.reset();
        renderer.announce(&format!("Game starting... {}", number))?;
        game.play(renderer)?;
        let outcome = game.outcome();
        debug!("Final board:\n{}", game.board());
        match outcome {
            Outcome::Win(symbol) => {
                if let Some(seat) = game.players().iter().position(|player| player.symbol == symbol) {
                    tally.wins[seat] += 1;
                }
            }
            Outcome::Draw => tally.ties += 1,
            Outcome::InProgress => {}
        }
        tally.games += 1;
        info!("Game {} of {}: {}", number, games, outcome);
    }
    Ok(tally)
}
